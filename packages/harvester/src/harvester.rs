//! Main harvester service that ties all components together.

use crate::config::Config;
use crate::error::Result;
use crate::fetch::{ApiClient, DocumentSource};
use crate::output::ensure_output_dir;
use crate::page::{build_page, write_page};
use crate::types::RunSummary;

/// Build and write every configured page against the live content API.
pub fn harvest(config: &Config) -> Result<RunSummary> {
    config.validate()?;
    let client = ApiClient::new(config)?;
    run(config, &client)
}

/// Build and write every configured page, in order.
///
/// The first error aborts the run. Files written for earlier pages are left
/// in place.
///
/// # Arguments
/// * `config` - Validated configuration
/// * `source` - Where documents come from
pub fn run(config: &Config, source: &dyn DocumentSource) -> Result<RunSummary> {
    ensure_output_dir(&config.output_dir)?;

    let mut summary = RunSummary::default();
    for page in &config.pages {
        tracing::info!(page = %page.filename, queries = page.query.len(), "Building page");
        let built = build_page(source, page, config.save_html)?;
        summary
            .files
            .extend(write_page(&config.output_dir, &built)?);
        summary.pages += 1;
    }

    tracing::info!(pages = summary.pages, files = summary.files.len(), "Harvest complete");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use tempfile::tempdir;

    use crate::config::QueryConfig;
    use crate::error::HarvesterError;
    use crate::types::FetchedDocument;

    struct StaticSource;

    impl DocumentSource for StaticSource {
        fn fetch(&self, query: &QueryConfig) -> Result<FetchedDocument> {
            match query.path.as_str() {
                "imprint" => Ok(FetchedDocument::new(
                    "<h1>Impressum</h1><p>Muster GmbH</p>",
                    "2020-01-01",
                    "2020-06-01",
                )),
                "terms" => Ok(FetchedDocument::new("<p>Ohne Titel</p>", "2020-01-01", "2020-06-01")),
                other => Err(HarvesterError::ApiStatus {
                    url: other.to_string(),
                    status: 500,
                }),
            }
        }
    }

    fn config(output_dir: &std::path::Path, pages: &str) -> Config {
        let yaml = format!(
            "api_url: https://api.example.com/\noutput_dir: {}\nsave_html: true\npages:\n{pages}",
            output_dir.display()
        );
        Config::from_yaml_str(&yaml).unwrap()
    }

    #[test]
    fn test_run_writes_all_pages() {
        let temp_dir = tempdir().unwrap();
        let out = temp_dir.path().join("legal");
        let config = config(
            &out,
            "  - filename: impressum\n    hugo_head: {title: H1_TEXT}\n    query: [{path: imprint, json_key: html}]\n  - filename: agb\n    query: [{path: terms, json_key: html}]\n",
        );

        let summary = run(&config, &StaticSource).unwrap();
        assert_eq!(summary.pages, 2);
        assert_eq!(summary.files.len(), 4);

        let impressum = fs::read_to_string(out.join("impressum.md")).unwrap();
        assert_eq!(impressum, "---\ntitle: Impressum\n---\n\nMuster GmbH\n\n");
        assert!(out.join("impressum.html").exists());
        assert!(out.join("agb.md").exists());
    }

    #[test]
    fn test_run_aborts_on_first_error_keeping_earlier_files() {
        let temp_dir = tempdir().unwrap();
        let out = temp_dir.path().to_path_buf();
        let config = config(
            &out,
            "  - filename: impressum\n    query: [{path: imprint, json_key: html}]\n  - filename: broken\n    query: [{path: missing, json_key: html}]\n  - filename: agb\n    query: [{path: terms, json_key: html}]\n",
        );

        let err = run(&config, &StaticSource).unwrap_err();
        assert!(matches!(err, HarvesterError::ApiStatus { status: 500, .. }));
        assert!(out.join("impressum.md").exists());
        assert!(!out.join("broken.md").exists());
        assert!(!out.join("agb.md").exists());
    }

    #[test]
    fn test_harvest_validates_first() {
        let config = Config::default();
        assert!(matches!(harvest(&config), Err(HarvesterError::Config(_))));
    }
}
