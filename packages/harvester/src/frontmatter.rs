//! Hugo front matter assembly.
//!
//! The page template is serialized as YAML between two `---` fences and the
//! placeholder tokens are then replaced textually. Replacement is not scoped
//! to any field: a token anywhere in the rendered block is substituted.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{HarvesterError, Result};

/// Front matter template: keys map to YAML values, normally strings that may
/// contain placeholder tokens. Keys are rendered in sorted order.
pub type FrontMatterTemplate = BTreeMap<String, serde_yaml_ng::Value>;

/// Replaced by the earliest creation timestamp of the page's documents.
pub const PUBLISH_DATE: &str = "PUBLISH_DATE";

/// Replaced by the latest modification timestamp of the page's documents.
pub const MOD_DATE: &str = "MOD_DATE";

/// Replaced by the text of the first top-level heading, which is then
/// removed from the body.
pub const H1_TEXT: &str = "H1_TEXT";

const FENCE: &str = "---";

/// First line starting with `# `.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static H1_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^# ([^\n]*)\n").expect("valid regex"));

/// Publish and modification dates of a page.
///
/// Timestamps are compared as plain strings, which is only chronological when
/// the API delivers them in one sortable format (ISO 8601 in a single zone).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub publish: String,
    pub modified: String,
}

impl DateRange {
    /// Minimum of `created` and maximum of `modified`.
    ///
    /// Returns [`HarvesterError::NoTimestamps`] if either list is empty.
    pub fn from_timestamps(created: &[String], modified: &[String]) -> Result<Self> {
        let publish = created.iter().min().ok_or(HarvesterError::NoTimestamps)?;
        let modified = modified.iter().max().ok_or(HarvesterError::NoTimestamps)?;
        Ok(Self {
            publish: publish.clone(),
            modified: modified.clone(),
        })
    }
}

/// Render the template as a fenced YAML block followed by a blank line.
pub fn render_front_matter(template: &FrontMatterTemplate) -> Result<String> {
    let yaml = serde_yaml_ng::to_string(template)?;
    Ok(format!("{FENCE}\n{yaml}{FENCE}\n\n"))
}

/// Find the first top-level heading line.
///
/// Returns the heading text and the body with that line removed.
pub fn extract_h1(markdown: &str) -> Option<(String, String)> {
    let caps = H1_LINE.captures(markdown)?;
    let line = caps.get(0)?;
    let text = caps.get(1)?.as_str().to_string();

    let mut body = String::with_capacity(markdown.len() - line.len());
    body.push_str(&markdown[..line.start()]);
    body.push_str(&markdown[line.end()..]);
    Some((text, body))
}

/// Prepend rendered front matter to a Markdown body.
///
/// # Arguments
/// * `markdown` - Converted page body
/// * `created` - Creation timestamps of all documents on the page
/// * `modified` - Modification timestamps of all documents on the page
/// * `template` - The page's front matter template
///
/// # Errors
/// [`HarvesterError::MissingRequiredHeading`] if the rendered front matter
/// contains `H1_TEXT` and the body has no line starting with `# `.
pub fn assemble_document(
    markdown: &str,
    created: &[String],
    modified: &[String],
    template: &FrontMatterTemplate,
) -> Result<String> {
    let dates = DateRange::from_timestamps(created, modified)?;

    let mut head = render_front_matter(template)?
        .replace(PUBLISH_DATE, &dates.publish)
        .replace(MOD_DATE, &dates.modified);

    let body = if head.contains(H1_TEXT) {
        let (h1_text, body) =
            extract_h1(markdown).ok_or(HarvesterError::MissingRequiredHeading { page: None })?;
        head = head.replace(H1_TEXT, &h1_text);
        body
    } else {
        markdown.to_string()
    };

    Ok(head + &body)
}
