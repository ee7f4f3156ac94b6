use std::time::Duration;

use reqwest::blocking::Client;
use scraper::Html;
use url::Url;

use crate::error::ScrapeError;

fn validate_url(page_url: &str) -> Result<Url, ScrapeError> {
    let parsed = Url::parse(page_url.trim()).map_err(|error| ScrapeError::FetchFailed {
        url: page_url.to_string(),
        reason: format!("invalid URL: {error}"),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(ScrapeError::FetchFailed {
            url: page_url.to_string(),
            reason: format!("unsupported URL scheme '{scheme}'"),
        }),
    }
}

/// Issues one blocking GET and returns the body text. The client's default
/// 30s timeout is switched off, and nothing is retried.
pub fn fetch_page(page_url: &str, user_agent: &str) -> Result<String, ScrapeError> {
    let parsed = validate_url(page_url)?;
    let fetch_failed = |error: reqwest::Error| ScrapeError::FetchFailed {
        url: page_url.to_string(),
        reason: error.to_string(),
    };

    let client = Client::builder()
        .user_agent(user_agent)
        .timeout(Option::<Duration>::None)
        .build()
        .map_err(fetch_failed)?;

    tracing::info!("Fetching HTML from: {}", parsed);
    let response = client.get(parsed).send().map_err(fetch_failed)?;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(ScrapeError::FetchStatus {
            url: page_url.to_string(),
            status: status.as_u16(),
        });
    }

    let html = response.text().map_err(fetch_failed)?;
    tracing::info!("Fetched {} bytes of HTML", html.len());
    Ok(html)
}

/// Parses a page body as HTML whatever its declared content type.
pub fn parse_document(html: &str) -> Result<Html, ScrapeError> {
    if html.trim().is_empty() {
        return Err(ScrapeError::ParseFailed("page body is empty".to_string()));
    }

    let document = Html::parse_document(html);
    if !document.errors.is_empty() {
        tracing::debug!("HTML parser recovered from {} error(s)", document.errors.len());
    }
    Ok(document)
}

pub fn fetch_and_parse(page_url: &str, user_agent: &str) -> Result<Html, ScrapeError> {
    let html = fetch_page(page_url, user_agent)?;
    parse_document(&html)
}
