//! Legal-text harvester - fetch legal documents from a content API and write
//! them as Hugo Markdown pages.
//!
//! Each configured page is built from one or more API documents. Their HTML
//! bodies are converted to Markdown, concatenated, and prefixed with front
//! matter rendered from the page's template.
//!
//! # Example
//!
//! ```
//! use legaltext_harvester::markdown::convert_html_to_markdown;
//!
//! assert_eq!(convert_html_to_markdown("<h1>Impressum</h1>"), "# Impressum\n");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration file, secret loading and validation
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client for the content API
//! - [`fetch`]: Document source abstraction and API client
//! - [`markdown`]: HTML to Markdown conversion
//! - [`frontmatter`]: Front matter rendering and placeholder substitution
//! - [`page`]: Page assembly
//! - [`output`]: File output
//! - [`types`]: Core data types
//! - [`cli`]: Command-line interface
//! - [`harvester`]: Main harvester service

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod frontmatter;
pub mod harvester;
pub mod http;
pub mod markdown;
pub mod output;
pub mod page;
pub mod types;

// Re-export main functions
pub use harvester::{harvest, run};

// Re-export commonly used items
pub use config::{Config, PageConfig, QueryConfig};
pub use error::{HarvesterError, Result};
pub use fetch::{ApiClient, DocumentSource};
pub use types::{BuiltPage, FetchedDocument, RunSummary};
