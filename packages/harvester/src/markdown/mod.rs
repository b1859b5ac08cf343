//! HTML to Markdown conversion for legal-text bodies.

mod convert;

pub use convert::convert_html_to_markdown;
