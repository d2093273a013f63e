//! Persisting a finished profile document.

use super::ProfileDocument;
use crate::core::LockerError;
use crate::utils::{format_size, write_replacing};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Size of a written profile in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PersistedSize(u64);

impl PersistedSize {
    /// Wraps a byte count.
    #[must_use]
    pub const fn new(bytes: u64) -> Self {
        Self(bytes)
    }

    /// The raw byte count.
    #[must_use]
    pub const fn bytes(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PersistedSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_size(self.0))
    }
}

/// A profile that has been written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProfile {
    /// Destination path
    pub path: PathBuf,
    /// Size of the file as reported by the file system after the write
    pub size: PersistedSize,
    /// Lowercase hex SHA-256 of the written bytes
    pub sha256: String,
}

/// Serializes profile documents and writes them to their destination.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileWriter;

impl ProfileWriter {
    /// Creates a writer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders `document` as two-space indented JSON without a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`LockerError::JsonError`] if serialization fails.
    pub fn serialize(&self, document: &ProfileDocument) -> Result<Vec<u8>, LockerError> {
        Ok(document.to_pretty_json()?.into_bytes())
    }

    /// Writes `document` to `destination`, replacing any previous file.
    ///
    /// The document is consumed; a profile is persisted at most once. Missing parent
    /// directories are not created.
    ///
    /// # Errors
    ///
    /// Returns [`LockerError::WriteFailure`] if the file cannot be written or its size
    /// cannot be read back.
    pub async fn finalize(
        &self,
        document: ProfileDocument,
        destination: &Path,
    ) -> Result<PersistedProfile, LockerError> {
        let bytes = self.serialize(&document)?;
        drop(document);

        let sha256 = hex::encode(Sha256::digest(&bytes));
        let path = destination.to_path_buf();
        let write_failure = |e: std::io::Error| LockerError::WriteFailure {
            path: destination.display().to_string(),
            reason: e.to_string(),
        };

        let target = path.clone();
        tokio::task::spawn_blocking(move || write_replacing(&target, &bytes))
            .await
            .map_err(|e| LockerError::Other {
                message: format!("Profile write task failed: {e}"),
            })?
            .map_err(write_failure)?;

        let metadata = tokio::fs::metadata(&path).await.map_err(write_failure)?;
        debug!(path = %path.display(), bytes = metadata.len(), "Profile written");

        Ok(PersistedProfile {
            path,
            size: PersistedSize::new(metadata.len()),
            sha256,
        })
    }
}
