//! Error types for the harvester.
//!
//! Every failure is fatal for the run: errors propagate to the CLI, which
//! prints them and exits non-zero.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// Invalid or incomplete configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be read.
    #[error("Failed to read configuration file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid YAML for the expected shape.
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[source] serde_yaml_ng::Error),

    /// Output filename that would escape the output directory.
    #[error("Invalid output filename: '{0}'. Expected a plain name without path separators")]
    InvalidFilename(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with something other than 200 OK.
    #[error("API request to {url} failed with status {status}")]
    ApiStatus { url: String, status: u16 },

    /// The API response body is not valid JSON.
    #[error("Invalid JSON in API response: {0}")]
    Json(#[from] serde_json::Error),

    /// A required string field is absent from the API response.
    #[error("API response has no string field '{field}'")]
    MissingField { field: String },

    /// Front matter dates were requested without any source documents.
    #[error("No document timestamps available to compute front matter dates")]
    NoTimestamps,

    /// The front matter references H1_TEXT but the body has no top-level heading.
    #[error("No h1 heading found{}, but the front matter template requires one", .page.as_ref().map(|p| format!(" in page '{p}'")).unwrap_or_default())]
    MissingRequiredHeading { page: Option<String> },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;
