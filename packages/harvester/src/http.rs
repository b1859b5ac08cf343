//! HTTP client wrapper for the content API.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::config::{API_KEY_HEADER, HTTP_TIMEOUT_SECS};
use crate::error::{HarvesterError, Result};

/// User agent string identifying this harvester.
const USER_AGENT: &str = concat!("legaltext-harvester/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` configured with timeout and user agent.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Issue one authenticated GET and parse the body as JSON.
///
/// There is no retry: any status other than 200 is returned as
/// [`HarvesterError::ApiStatus`].
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - Full document URL
/// * `api_key` - Value sent in the API key header
pub fn get_json(client: &Client, url: &str, api_key: &str) -> Result<serde_json::Value> {
    tracing::debug!(url, "Requesting document");

    let response = client.get(url).header(API_KEY_HEADER, api_key).send()?;

    let status = response.status();
    if status != StatusCode::OK {
        tracing::warn!(url, status = %status, "API returned non-200 status");
        return Err(HarvesterError::ApiStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes()?;
    tracing::debug!(url, bytes = bytes.len(), "Received document");
    Ok(serde_json::from_slice(&bytes)?)
}
