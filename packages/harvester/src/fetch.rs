//! Document fetching from the content API.
//!
//! Each query names a path below the API base URL and the JSON field that
//! carries the HTML body. The response must also provide `created` and
//! `modified` timestamps as strings.

use std::fmt;

use reqwest::blocking::Client;
use serde_json::Value;

use crate::config::{api_document_url, Config, QueryConfig};
use crate::error::{HarvesterError, Result};
use crate::http::{create_client, get_json};
use crate::types::FetchedDocument;

/// JSON field holding the creation timestamp.
pub const CREATED_FIELD: &str = "created";

/// JSON field holding the modification timestamp.
pub const MODIFIED_FIELD: &str = "modified";

/// Source of documents for the page builder, enabling mocking in tests.
pub trait DocumentSource {
    fn fetch(&self, query: &QueryConfig) -> Result<FetchedDocument>;
}

/// Live content API client.
///
/// NOTE: `Debug` is implemented manually so the API key is never printed.
pub struct ApiClient {
    http: Client,
    api_url: String,
    api_key: String,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl ApiClient {
    /// Create a client for the API described by `config`.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            http: create_client()?,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

impl DocumentSource for ApiClient {
    fn fetch(&self, query: &QueryConfig) -> Result<FetchedDocument> {
        let url = api_document_url(&self.api_url, &query.path);
        let json = get_json(&self.http, &url, &self.api_key)?;
        parse_document(&json, &query.json_key)
    }
}

/// Extract the HTML body and timestamps from an API response.
///
/// # Arguments
/// * `json` - Parsed response body
/// * `json_key` - Name of the field holding the HTML
pub fn parse_document(json: &Value, json_key: &str) -> Result<FetchedDocument> {
    Ok(FetchedDocument {
        html: string_field(json, json_key)?,
        created: string_field(json, CREATED_FIELD)?,
        modified: string_field(json, MODIFIED_FIELD)?,
    })
}

fn string_field(json: &Value, field: &str) -> Result<String> {
    json.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| HarvesterError::MissingField {
            field: field.to_string(),
        })
}
