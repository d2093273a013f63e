//! Catalog retrieval and envelope validation.
//!
//! A catalog snapshot is fetched once per run from a [`CatalogSource`]. Two
//! sources exist:
//!
//! - [`HttpCatalogSource`] - `GET` against the provider endpoint
//! - [`FileCatalogSource`] - the same envelope read from a local file
//!
//! Both expect the provider envelope:
//!
//! ```json
//! { "data": { "<category>": [ { "id": "...", "type": { "backendValue": "..." } } ] } }
//! ```
//!
//! A missing or non-object `data` field is a [`LockerError::MalformedEnvelope`].
//! Category values that are not lists are dropped with a warning; individual
//! entries are kept as raw JSON and validated later by
//! [`crate::transform::ItemTransformer`].
//!
//! There are no retries. A failed fetch aborts the run and re-running the whole
//! pipeline is the recovery strategy.

mod http;
pub mod raw;

pub use http::HttpCatalogSource;
pub use raw::{RawItem, RawOption, RawVariant};

use crate::core::LockerError;
use serde_json::Value;
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A source of catalog snapshots.
pub trait CatalogSource {
    /// Human-readable origin (URL or path) used in logs and errors.
    fn origin(&self) -> String;

    /// Retrieves one full catalog snapshot.
    ///
    /// # Errors
    ///
    /// - [`LockerError::SourceUnavailable`] when the provider cannot be reached,
    ///   answers with a non-2xx status, or the body cannot be read
    /// - [`LockerError::MalformedEnvelope`] when the body lacks the `data` object
    fn fetch(&self) -> impl Future<Output = Result<CatalogSnapshot, LockerError>> + Send;
}

/// One category of the catalog with its entries in provider order.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogCategory {
    /// Category name (e.g. `br`, `tracks`)
    pub name: String,
    /// Raw entries, validated per item during transformation
    pub items: Vec<Value>,
}

/// A full catalog snapshot, ordered as the provider returned it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    categories: Vec<CatalogCategory>,
}

impl CatalogSnapshot {
    /// Builds a snapshot from already-split categories.
    #[must_use]
    pub const fn new(categories: Vec<CatalogCategory>) -> Self {
        Self {
            categories,
        }
    }

    /// Categories in provider order.
    #[must_use]
    pub fn categories(&self) -> &[CatalogCategory] {
        &self.categories
    }

    /// Total number of raw entries across all categories.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    /// Whether the snapshot has no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Parses and validates a provider envelope.
///
/// # Errors
///
/// Returns [`LockerError::MalformedEnvelope`] when `body` is not JSON or its
/// `data` field is missing, `null`, or not an object.
///
/// # Examples
///
/// ```rust
/// use locker_gen::catalog::parse_envelope;
///
/// let snapshot = parse_envelope("inline", r#"{"data":{"br":[{"id":"CID_001"}]}}"#).unwrap();
/// assert_eq!(snapshot.categories()[0].name, "br");
/// assert_eq!(snapshot.item_count(), 1);
///
/// assert!(parse_envelope("inline", r#"{"status":200}"#).is_err());
/// ```
pub fn parse_envelope(origin: &str, body: &str) -> Result<CatalogSnapshot, LockerError> {
    let envelope: Value =
        serde_json::from_str(body).map_err(|e| LockerError::MalformedEnvelope {
            origin: origin.to_string(),
            reason: format!("response is not valid JSON: {e}"),
        })?;

    let data = match envelope.get("data") {
        None | Some(Value::Null) => {
            return Err(LockerError::MalformedEnvelope {
                origin: origin.to_string(),
                reason: "missing `data` field".to_string(),
            });
        }
        Some(Value::Object(data)) => data,
        Some(_) => {
            return Err(LockerError::MalformedEnvelope {
                origin: origin.to_string(),
                reason: "`data` is not an object".to_string(),
            });
        }
    };

    let mut categories = Vec::with_capacity(data.len());
    for (name, entries) in data {
        match entries {
            Value::Array(items) => categories.push(CatalogCategory {
                name: name.clone(),
                items: items.clone(),
            }),
            other => {
                warn!(category = %name, value = %other, "Skipping catalog category that is not a list");
            }
        }
    }

    let snapshot = CatalogSnapshot::new(categories);
    debug!(
        origin,
        categories = snapshot.categories().len(),
        items = snapshot.item_count(),
        "Parsed catalog envelope"
    );
    Ok(snapshot)
}

/// Reads the catalog envelope from a local file.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    /// Creates a source reading `path` on every fetch.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    /// Path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for FileCatalogSource {
    fn origin(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<CatalogSnapshot, LockerError> {
        let origin = self.origin();
        let body = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            LockerError::SourceUnavailable {
                origin: origin.clone(),
                reason: e.to_string(),
            }
        })?;

        parse_envelope(&origin, &body)
    }
}
