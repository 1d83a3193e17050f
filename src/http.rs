//! GET helper with bounded retry on transient failures.

use std::time::{Duration, Instant};

use tracing::warn;

use crate::error::Result;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const SLOW_REQUEST_THRESHOLD: Duration = Duration::from_secs(10);
const MAX_ATTEMPTS: u32 = 3;
const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(250);

/// Builds the shared HTTP client with an explicit per-request timeout.
pub fn client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?)
}

/// GET with `error_for_status`. Connect errors, timeouts and 5xx responses
/// are retried with exponential backoff; everything else fails immediately.
pub async fn get(client: &reqwest::Client, url: &str) -> Result<reqwest::Response> {
    let mut delay = INITIAL_RETRY_DELAY;
    let mut attempt = 1;
    loop {
        let started = Instant::now();
        let result = match client.get(url).send().await {
            Ok(response) => response.error_for_status(),
            Err(err) => Err(err),
        };
        if started.elapsed() > SLOW_REQUEST_THRESHOLD {
            warn!(
                "request to {url} took {:.1}s",
                started.elapsed().as_secs_f32()
            );
        }
        match result {
            Ok(response) => return Ok(response),
            Err(err) if attempt < MAX_ATTEMPTS && is_transient(&err) => {
                warn!("request to {url} failed ({err}), retrying in {delay:?}");
                tokio::time::sleep(delay).await;
                delay *= 2;
                attempt += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    if err.is_timeout() || err.is_connect() {
        return true;
    }
    err.status().is_some_and(|status| status.is_server_error())
}
