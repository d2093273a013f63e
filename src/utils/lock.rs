//! Single-flight locking for profile destinations.
//!
//! Two runs writing the same destination must not interleave. Each run holds an
//! exclusive OS file lock next to the destination for its whole duration; the lock
//! is released when the [`OutputLock`] is dropped.
//!
//! Releasing the lock does not remove the lock file. `.<name>.lock` stays beside
//! the destination after the first run and is reopened by every later run, so it
//! must not be deleted while a run may be in progress.

use crate::core::LockerError;
use fs4::fs_std::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// An exclusive lock keyed by a destination path.
#[derive(Debug)]
pub struct OutputLock {
    file: File,
    path: PathBuf,
}

impl OutputLock {
    /// Returns the lock file path used for `destination`.
    ///
    /// The lock lives beside the destination as a hidden file and is left in place
    /// after release:
    /// ```text
    /// profiles/athena.json -> profiles/.athena.json.lock
    /// ```
    #[must_use]
    pub fn lock_path_for(destination: &Path) -> PathBuf {
        let file_name = destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "profile".to_string());
        destination.with_file_name(format!(".{file_name}.lock"))
    }

    /// Acquires the exclusive lock for `destination`, waiting for any other holder.
    ///
    /// The blocking lock call runs on `spawn_blocking` so the runtime stays free.
    ///
    /// # Errors
    ///
    /// Returns [`LockerError::WriteFailure`] when the lock file cannot be created
    /// (missing directory, permissions), since the destination is then not writable
    /// either.
    pub async fn acquire(destination: &Path) -> Result<Self, LockerError> {
        let lock_path = Self::lock_path_for(destination);
        let lock_path_clone = lock_path.clone();
        let destination_display = destination.display().to_string();

        let file = tokio::task::spawn_blocking(move || -> Result<File, LockerError> {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&lock_path_clone)
                .map_err(|e| LockerError::WriteFailure {
                    path: destination_display.clone(),
                    reason: format!(
                        "cannot create lock file {}: {e}",
                        lock_path_clone.display()
                    ),
                })?;

            file.lock_exclusive().map_err(|e| LockerError::WriteFailure {
                path: destination_display,
                reason: format!("cannot lock {}: {e}", lock_path_clone.display()),
            })?;

            Ok(file)
        })
        .await
        .map_err(|e| LockerError::Other {
            message: format!("Lock acquisition task failed: {e}"),
        })??;

        debug!(lock = %lock_path.display(), "Acquired output lock");

        Ok(Self {
            file,
            path: lock_path,
        })
    }

    /// Path of the held lock file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for OutputLock {
    fn drop(&mut self) {
        #[allow(unstable_name_collisions)]
        if let Err(e) = self.file.unlock() {
            tracing::warn!("Failed to unlock {}: {}", self.path.display(), e);
        }
    }
}
