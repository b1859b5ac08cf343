//! Page assembly: fetch every query of a page, convert, concatenate and
//! prepend front matter.

use std::path::{Path, PathBuf};

use crate::config::PageConfig;
use crate::error::{HarvesterError, Result};
use crate::fetch::DocumentSource;
use crate::frontmatter::assemble_document;
use crate::markdown::convert_html_to_markdown;
use crate::output::save_string;
use crate::types::BuiltPage;

/// Build one page from its queries.
///
/// Queries are fetched in configured order and their content is concatenated
/// in that order. Dates are the minimum creation and maximum modification
/// timestamp over all queries.
///
/// # Arguments
/// * `source` - Where documents come from
/// * `page` - The page descriptor
/// * `save_html` - Whether to keep the concatenated raw HTML
pub fn build_page(
    source: &dyn DocumentSource,
    page: &PageConfig,
    save_html: bool,
) -> Result<BuiltPage> {
    let mut created = Vec::with_capacity(page.query.len());
    let mut modified = Vec::with_capacity(page.query.len());
    let mut page_html = String::new();
    let mut page_md = String::new();

    for query in &page.query {
        tracing::debug!(page = %page.filename, path = %query.path, "Fetching document");
        let doc = source.fetch(query)?;

        if save_html {
            page_html.push_str(doc.html.trim());
            page_html.push('\n');
        }
        page_md.push_str(&convert_html_to_markdown(&doc.html));
        page_md.push('\n');

        created.push(doc.created);
        modified.push(doc.modified);
    }

    let markdown =
        assemble_document(&page_md, &created, &modified, &page.hugo_head).map_err(|e| {
            if let HarvesterError::MissingRequiredHeading { page: None } = e {
                HarvesterError::MissingRequiredHeading {
                    page: Some(page.filename.clone()),
                }
            } else {
                e
            }
        })?;

    Ok(BuiltPage {
        filename: page.filename.clone(),
        markdown,
        html: save_html.then_some(page_html),
    })
}

/// Write a built page as `<filename>.html` (if kept) and `<filename>.md`.
///
/// # Returns
/// Paths of the written files, HTML first
pub fn write_page(output_dir: &Path, page: &BuiltPage) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(2);
    if let Some(html) = &page.html {
        written.push(save_string(
            output_dir,
            &format!("{}.html", page.filename),
            html,
        )?);
    }
    written.push(save_string(
        output_dir,
        &format!("{}.md", page.filename),
        &page.markdown,
    )?);
    Ok(written)
}
