//! Text output for compiled maps.
//!
//! Writes rendered record text to disk, replacing or appending to the
//! target file.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{ReflexError, Result};

/// Write map text to a file.
///
/// # Arguments
///
/// * `path` - Output file path; parent directories are created
/// * `text` - Rendered records
/// * `append` - Append to an existing file instead of replacing it
pub fn write_text(path: &Path, text: &str, append: bool) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ReflexError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .map_err(|e| ReflexError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to open output: {}", e),
        })?;

    file.write_all(text.as_bytes()).map_err(|e| ReflexError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write output: {}", e),
    })?;

    Ok(())
}

/// Prefab definitions file next to a geometry output:
/// `level.txt` becomes `level.prefabs.txt`.
pub fn default_prefab_output(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    output.with_file_name(format!("{}.prefabs.txt", stem))
}
