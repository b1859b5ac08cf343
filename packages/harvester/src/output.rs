//! Writing generated pages to the output directory.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{HarvesterError, Result};

/// Create the output directory (and its parents) if it does not exist.
///
/// An empty path stands for the current directory.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    if dir.exists() && !dir.is_dir() {
        return Err(HarvesterError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Output path is not a directory: {}", dir.display()),
        )));
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Write `content` to `dir/filename`, replacing any existing file.
///
/// `filename` may name a subdirectory of `dir`; missing directories are
/// created.
///
/// Writes to a temp file, syncs it, then renames it over the target so a
/// crash never leaves a truncated page behind.
///
/// # Returns
/// Path to the written file
pub fn save_string(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let output_file = dir.join(filename);
    if let Some(parent) = output_file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file_name = output_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| HarvesterError::InvalidFilename(filename.to_string()))?;
    let temp_file = output_file.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if output_file.exists() {
        fs::remove_file(&output_file)?;
    }

    fs::rename(&temp_file, &output_file)?;

    tracing::info!(path = %output_file.display(), bytes = content.len(), "Wrote file");
    Ok(output_file)
}
