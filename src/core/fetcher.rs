// src/core/fetcher.rs

use reqwest::header::HeaderMap;
use scraper::Html;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::core::error::FetchError;

const USER_AGENT: &str = "PageShield/0.1";
// The whole request, redirects included, must finish inside this window.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// A fetched page, ready for classification: the final URL after redirects,
/// the parsed document and the response headers. The engine only reads it.
pub struct PageCapture {
    pub url: Url,
    pub document: Html,
    pub headers: HeaderMap,
}

/// Retrieves `target` under a bounded timeout and parses the body.
///
/// Every failure mode (connect, timeout, non-success status, body read)
/// surfaces as a typed `FetchError`; this function never hangs the caller
/// and never panics.
pub async fn fetch_page(target: &str) -> Result<PageCapture, FetchError> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .build()?;

    let response = client.get(target).send().await?;
    let status = response.status();
    info!(target, status = %status, "Received HTTP response.");
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let url = response.url().clone();
    let headers = response.headers().clone();
    let body = response.text().await?;
    debug!(bytes = body.len(), "Read response body.");

    Ok(PageCapture {
        url,
        document: Html::parse_document(&body),
        headers,
    })
}
