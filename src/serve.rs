use anyhow::{Context, Result};
use bytes::BufMut;
use futures_util::TryStreamExt;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{info, warn};
use warp::multipart::{FormData, Part};
use warp::{Filter, Rejection, Reply};

use crate::grid::Grid;
use crate::parse::{self, ParseOptions};

/// Upload cap; schedule exports are a few hundred KB at most.
const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

const UPLOAD_FIELD: &str = "csv_file";

#[derive(Serialize)]
struct ParseResponse {
    success: bool,
    message: String,
    record_count: usize,
    report: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    details: Option<String>,
}

/// All routes of the upload front-end.
pub fn routes() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let index = warp::path::end()
        .and(warp::get())
        .map(|| warp::reply::html(render_page("")));

    let upload = warp::path("upload")
        .and(warp::post())
        .and(warp::multipart::form().max_length(MAX_UPLOAD_BYTES))
        .and_then(handle_upload);

    let health = warp::path("health").and(warp::get()).and_then(health_check);

    let api_parse = warp::path!("api" / "parse")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_UPLOAD_BYTES))
        .and(warp::body::bytes())
        .and_then(handle_api_parse);

    index.or(upload).or(health).or(api_parse)
}

async fn health_check() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&serde_json::json!({
        "status": "healthy",
        "service": "flight-schedule-parser"
    })))
}

/// Multipart upload: write the file to a temp path, load and parse it,
/// render the result (or the error message) back into the page. The temp
/// file is removed when the handler returns.
async fn handle_upload(form: FormData) -> Result<impl Reply, Rejection> {
    let output = match read_upload(form).await {
        Ok(bytes) => {
            info!(bytes = bytes.len(), "received schedule upload");
            match parse_upload(&bytes) {
                Ok(report) => report,
                Err(err) => {
                    warn!("upload parse failed: {:#}", err);
                    format!("Error: {:#}", err)
                }
            }
        }
        Err(err) => {
            warn!("upload rejected: {:#}", err);
            format!("Error: {:#}", err)
        }
    };
    Ok(warp::reply::html(render_page(&output)))
}

/// JSON API: raw CSV body in, report out.
async fn handle_api_parse(body: bytes::Bytes) -> Result<impl Reply, Rejection> {
    let text = match std::str::from_utf8(&body) {
        Ok(t) => t,
        Err(e) => {
            return Ok(warp::reply::json(&ErrorResponse {
                error: "body is not valid UTF-8".to_string(),
                details: Some(e.to_string()),
            }))
        }
    };

    match parse::parse_schedule(text) {
        Ok(report) => {
            let record_count = report.lines().count() / 2;
            info!(record_count, "parsed schedule via api");
            Ok(warp::reply::json(&ParseResponse {
                success: true,
                message: "schedule parsed".to_string(),
                record_count,
                report,
            }))
        }
        Err(err) => {
            warn!("api parse failed: {}", err);
            Ok(warp::reply::json(&ErrorResponse {
                error: "parse failed".to_string(),
                details: Some(err.to_string()),
            }))
        }
    }
}

/// Collect the bytes of the `csv_file` part.
async fn read_upload(form: FormData) -> Result<Vec<u8>> {
    let parts: Vec<Part> = form
        .try_collect()
        .await
        .context("reading multipart form")?;

    let part = parts
        .into_iter()
        .find(|p| p.name() == UPLOAD_FIELD)
        .context("no file uploaded")?;

    part.stream()
        .try_fold(Vec::new(), |mut acc, data| {
            acc.put(data);
            async move { Ok(acc) }
        })
        .await
        .context("reading uploaded file")
}

fn parse_upload(bytes: &[u8]) -> Result<String> {
    let tmp = NamedTempFile::new().context("creating temp file")?;
    std::fs::write(tmp.path(), bytes).context("storing upload")?;
    let grid = Grid::from_path(tmp.path())?;
    let report = parse::parse_grid(&grid, &ParseOptions::default())?;
    Ok(report)
}

fn render_page(output: &str) -> String {
    format!(
        "<!doctype html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>Flight Schedule Parser</title></head>\n\
         <body>\n\
         <h1>Flight schedule upload</h1>\n\
         <form method=\"post\" action=\"/upload\" enctype=\"multipart/form-data\">\n\
         <input type=\"file\" name=\"{}\" accept=\".csv\">\n\
         <button type=\"submit\">Parse</button>\n\
         </form>\n\
         <pre>{}</pre>\n\
         </body>\n\
         </html>\n",
        UPLOAD_FIELD,
        escape_html(output)
    )
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
