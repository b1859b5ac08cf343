//! Configuration loading and validation for the harvester.
//!
//! The configuration is read once from a YAML file, the API key is then
//! taken from the environment (optionally seeded from a `.env` file), and the
//! resulting value is passed by reference to everything that needs it.

use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::error::{HarvesterError, Result};
use crate::frontmatter::FrontMatterTemplate;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Default location of the dotenv file holding secrets.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Environment variable carrying the API key.
pub const API_KEY_ENV: &str = "API_KEY";

/// Request header the content API expects the key in.
pub const API_KEY_HEADER: &str = "eRecht24";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// One remote document that contributes to a page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryConfig {
    /// Path appended verbatim to `api_url`.
    pub path: String,
    /// Name of the JSON field holding the HTML body.
    pub json_key: String,
}

/// One output page, assembled from one or more queries.
#[derive(Debug, Clone, Deserialize)]
pub struct PageConfig {
    #[serde(default)]
    pub query: Vec<QueryConfig>,
    /// Output filename without extension.
    pub filename: String,
    #[serde(default)]
    pub hugo_head: FrontMatterTemplate,
}

/// Harvester configuration.
///
/// Fields absent from the file keep their defaults.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: String,
    pub api_url: String,
    pub output_dir: PathBuf,
    pub save_html: bool,
    pub pages: Vec<PageConfig>,
}

// The API key must never end up in logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("output_dir", &self.output_dir)
            .field("save_html", &self.save_html)
            .field("pages", &self.pages)
            .finish()
    }
}

impl Config {
    /// Parse a configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(HarvesterError::ConfigParse)
    }

    /// Read and parse the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| HarvesterError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&content)?;
        tracing::debug!(path = %path.display(), pages = config.pages.len(), "Loaded configuration");
        Ok(config)
    }

    /// Replace the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Override the API key when a value is present, keep the file value otherwise.
    #[must_use]
    pub fn with_api_key_override(self, api_key: Option<String>) -> Self {
        match api_key {
            Some(key) => self.with_api_key(key),
            None => self,
        }
    }

    /// Apply the secret source: load `env_file` (if given and present), then
    /// take `API_KEY` from the process environment.
    ///
    /// Variables already set in the environment are not overwritten by the file.
    pub fn apply_env(self, env_file: Option<&Path>) -> Result<Self> {
        if let Some(path) = env_file {
            load_env_file(path)?;
        }
        Ok(self.with_api_key_override(std::env::var(API_KEY_ENV).ok()))
    }

    /// Check the configuration before any request is made.
    pub fn validate(&self) -> Result<()> {
        if self.api_url.is_empty() {
            return Err(HarvesterError::Config("api_url is not set".into()));
        }
        if self.api_key.is_empty() {
            return Err(HarvesterError::Config(format!(
                "{API_KEY_ENV} not set in environment or configuration"
            )));
        }
        for page in &self.pages {
            validate_filename(&page.filename)?;
            if page.query.is_empty() {
                return Err(HarvesterError::Config(format!(
                    "page '{}' has no queries",
                    page.filename
                )));
            }
        }
        Ok(())
    }
}

fn load_env_file(path: &Path) -> Result<()> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Loaded environment file");
            Ok(())
        }
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(HarvesterError::Config(format!(
            "failed to load {}: {e}",
            path.display()
        ))),
    }
}

/// Validate an output filename (without extension).
///
/// The name may contain subdirectories but must stay relative to the output
/// directory: absolute paths, `.` and `..` components are rejected.
///
/// # Examples
/// ```
/// use legaltext_harvester::config::validate_filename;
///
/// assert!(validate_filename("impressum").is_ok());
/// assert!(validate_filename("de/impressum").is_ok());
/// assert!(validate_filename("../etc/passwd").is_err());
/// assert!(validate_filename("").is_err());
/// ```
pub fn validate_filename(filename: &str) -> Result<()> {
    let relative = Path::new(filename)
        .components()
        .all(|component| matches!(component, Component::Normal(_)));

    if filename.is_empty() || !relative {
        return Err(HarvesterError::InvalidFilename(filename.to_string()));
    }
    Ok(())
}

/// Build the request URL for a document path.
///
/// The path is appended as-is, so `api_url` must carry any trailing slash.
pub fn api_document_url(api_url: &str, path: &str) -> String {
    format!("{api_url}{path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
api_url: https://api.example.com/v1/
output_dir: content/legal
save_html: true
pages:
  - filename: impressum
    hugo_head:
      title: H1_TEXT
      date: PUBLISH_DATE
    query:
      - path: imprint
        json_key: html_de
  - filename: datenschutz
    query:
      - path: privacyPolicy
        json_key: html_de
      - path: privacyPolicySocialMedia
        json_key: html_de
"#;

    #[test]
    fn test_parse_sample_config() {
        let config = Config::from_yaml_str(SAMPLE).unwrap();

        assert_eq!(config.api_url, "https://api.example.com/v1/");
        assert_eq!(config.output_dir, PathBuf::from("content/legal"));
        assert!(config.save_html);
        assert_eq!(config.pages.len(), 2);
        assert_eq!(config.pages[0].filename, "impressum");
        assert_eq!(
            config.pages[0].query,
            vec![QueryConfig {
                path: "imprint".to_string(),
                json_key: "html_de".to_string(),
            }]
        );
        assert_eq!(config.pages[1].query.len(), 2);
        assert!(config.pages[1].hugo_head.is_empty());
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let config = Config::from_yaml_str("pages: []").unwrap();

        assert_eq!(config.api_key, "");
        assert_eq!(config.api_url, "");
        assert_eq!(config.output_dir, PathBuf::new());
        assert!(!config.save_html);
        assert!(config.pages.is_empty());
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let err = Config::from_yaml_str("pages: [unclosed").unwrap_err();
        assert!(matches!(err, HarvesterError::ConfigParse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/config.yaml")).unwrap_err();
        assert!(matches!(err, HarvesterError::ConfigRead { .. }));
    }

    #[test]
    fn test_api_key_override() {
        let config = Config::from_yaml_str("api_key: from-file").unwrap();

        let kept = config.clone().with_api_key_override(None);
        assert_eq!(kept.api_key, "from-file");

        let replaced = config.with_api_key_override(Some("from-env".to_string()));
        assert_eq!(replaced.api_key, "from-env");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config::default().with_api_key("super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_validate() {
        let config = Config::from_yaml_str(SAMPLE).unwrap().with_api_key("key");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_api_url_and_key() {
        let config = Config::default().with_api_key("key");
        assert!(matches!(config.validate(), Err(HarvesterError::Config(_))));

        let config = Config::from_yaml_str(SAMPLE).unwrap();
        assert!(matches!(config.validate(), Err(HarvesterError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_page_without_queries() {
        let yaml = "api_url: https://api.example.com/\npages:\n  - filename: empty\n";
        let config = Config::from_yaml_str(yaml).unwrap().with_api_key("key");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_validate_filename() {
        assert!(validate_filename("impressum").is_ok());
        assert!(validate_filename("agb-2024").is_ok());
        assert!(validate_filename("agb..v2").is_ok());
        assert!(validate_filename("de/impressum").is_ok());
        assert!(validate_filename("").is_err());
        assert!(validate_filename("..").is_err());
        assert!(validate_filename("../impressum").is_err());
        assert!(validate_filename("de/../../impressum").is_err());
        assert!(validate_filename("/etc/passwd").is_err());
        assert!(validate_filename("./impressum").is_err());
    }

    #[test]
    fn test_api_document_url() {
        assert_eq!(
            api_document_url("https://api.example.com/v1/", "imprint"),
            "https://api.example.com/v1/imprint"
        );
        assert_eq!(
            api_document_url("https://api.example.com", "/imprint"),
            "https://api.example.com/imprint"
        );
    }
}
