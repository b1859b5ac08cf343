//! Core data types for the harvester.

use std::path::PathBuf;

/// A document as returned by the content API.
///
/// Only lives for the duration of one page build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedDocument {
    /// HTML body taken from the configured JSON field.
    pub html: String,
    /// Creation timestamp, kept as the raw string from the API.
    pub created: String,
    /// Modification timestamp, kept as the raw string from the API.
    pub modified: String,
}

impl FetchedDocument {
    pub fn new(
        html: impl Into<String>,
        created: impl Into<String>,
        modified: impl Into<String>,
    ) -> Self {
        Self {
            html: html.into(),
            created: created.into(),
            modified: modified.into(),
        }
    }
}

/// A fully assembled page, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPage {
    /// Output filename without extension.
    pub filename: String,
    /// Front matter followed by the Markdown body.
    pub markdown: String,
    /// Concatenated raw HTML, present only when HTML snapshots are enabled.
    pub html: Option<String>,
}

/// Outcome of a complete run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of pages built.
    pub pages: usize,
    /// Every file written, in write order.
    pub files: Vec<PathBuf>,
}
