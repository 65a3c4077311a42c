use anyhow::Result;
use flightsched::{keepalive, serve};
use reqwest::Client;
use std::env;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env_filter).init();
    info!("startup");

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) configure ────────────────────────────────────────────────
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    // ─── 3) keep-alive ping (production only) ────────────────────────
    let client = Client::new();
    keepalive::spawn(client, port);

    // ─── 4) serve ────────────────────────────────────────────────────
    let routes = serve::routes();
    info!("server starting on port {}", port);
    info!("upload form: http://localhost:{}/", port);
    info!("health check: http://localhost:{}/health", port);
    warp::serve(routes).run(([0, 0, 0, 0], port)).await;

    Ok(())
}
