//! File system helpers for persisting generated documents.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Returns the sibling temp path used while replacing `path`.
///
/// ```text
/// profiles/athena.json -> profiles/.athena.json.tmp
/// ```
#[must_use]
pub fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{file_name}.tmp"))
}

/// Replaces the contents of `path` with `content` using a write-then-rename strategy.
///
/// 1. Writes `content` to a sibling temp file
/// 2. Syncs the temp file to disk
/// 3. Renames the temp file over `path`
///
/// Unlike a plain overwrite, readers never observe a truncated file. Parent
/// directories are NOT created: a missing directory is reported as an error so a
/// mistyped destination does not silently spawn a new tree.
///
/// # Errors
///
/// Returns the underlying I/O error of whichever step failed. The temp file is
/// removed on a failed rename.
pub fn write_replacing(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let temp_path = temp_path_for(path);

    {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}
