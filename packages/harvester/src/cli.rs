//! Command-line interface for the harvester.

use std::path::{Path, PathBuf};

use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{Config, DEFAULT_CONFIG_PATH, DEFAULT_ENV_FILE};
use crate::error::Result;
use crate::harvester::harvest;

/// Fetch legal texts from the content API and write them as Hugo Markdown pages.
#[derive(Parser)]
#[command(name = "legaltext-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Dotenv file providing API_KEY (ignored if missing)
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    harvest_command(&cli.config, &cli.env_file)
}

/// Load configuration and build all pages.
fn harvest_command(config_path: &Path, env_file: &Path) -> Result<()> {
    let config = Config::load(config_path)?.apply_env(Some(env_file))?;

    println!(
        "{} {} page(s) from {}",
        style("Harvesting").bold(),
        style(config.pages.len()).cyan(),
        style(&config.api_url).green()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Fetching documents...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let summary = match harvest(&config) {
        Ok(summary) => summary,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    for path in &summary.files {
        println!("  {} {}", style("Saved").green().bold(), path.display());
    }
    println!();
    println!(
        "{} {} page(s), {} file(s)",
        style("Done:").green().bold(),
        summary.pages,
        summary.files.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["legaltext-harvester"]);
        assert_eq!(cli.config, PathBuf::from("config.yaml"));
        assert_eq!(cli.env_file, PathBuf::from(".env"));
    }

    #[test]
    fn test_cli_custom_paths() {
        let cli = Cli::parse_from([
            "legaltext-harvester",
            "--config",
            "site/legal.yaml",
            "--env-file",
            "secrets.env",
        ]);
        assert_eq!(cli.config, PathBuf::from("site/legal.yaml"));
        assert_eq!(cli.env_file, PathBuf::from("secrets.env"));
    }
}
