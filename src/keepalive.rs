use reqwest::Client;
use std::{env, time::Duration};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use url::Url;

const PING_INTERVAL: Duration = Duration::from_secs(270);
const PING_TIMEOUT: Duration = Duration::from_secs(10);

/// Externally visible base URL: `APP_URL` if set (trailing slashes
/// stripped), otherwise localhost on the given port.
pub fn app_url(port: u16) -> String {
    match env::var("APP_URL") {
        Ok(url) => url.trim_end_matches('/').to_string(),
        Err(_) => format!("http://localhost:{}", port),
    }
}

fn is_local(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => matches!(
            parsed.host_str(),
            Some("localhost") | Some("127.0.0.1") | None
        ),
        Err(_) => true,
    }
}

/// Spawn the keep-alive loop: ping the app URL every few minutes so a
/// hosted instance is not idled out by the platform. Local URLs never
/// ping; the first ping fires immediately.
pub fn spawn(client: Client, port: u16) -> Option<JoinHandle<()>> {
    let url = app_url(port);
    if is_local(&url) {
        info!("keep-alive disabled for {}", url);
        return None;
    }

    info!("keep-alive pinging {} every {:?}", url, PING_INTERVAL);
    Some(tokio::spawn(async move {
        let mut tick = tokio::time::interval(PING_INTERVAL);
        loop {
            tick.tick().await;
            match client.get(&url).timeout(PING_TIMEOUT).send().await {
                Ok(resp) => info!(status = %resp.status(), "keep-alive ping"),
                Err(err) => warn!("keep-alive ping failed: {}", err),
            }
        }
    }))
}
