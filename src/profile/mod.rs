//! The profile document accumulating normalized items.
//!
//! A [`ProfileDocument`] is loaded from a template at the start of a run, receives
//! every normalized item through [`ProfileDocument::upsert_item`], and is handed to
//! [`ProfileWriter`] exactly once. Each run loads its own copy; a document is never
//! shared between runs.
//!
//! Every template field other than `items` is carried through untouched, in its
//! original position. Inside `items`, keys the run does not produce are kept as-is.
//!
//! # Collision policy
//!
//! Items are keyed by composite id and the last write wins: an upsert for an
//! existing key (from the template or earlier in the same run) replaces the whole
//! record while the key keeps its original position in the document.

pub mod writer;

pub use writer::{PersistedProfile, PersistedSize, ProfileWriter};

use crate::core::LockerError;
use crate::models::NormalizedItem;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::path::Path;

/// Name of the item collection inside a profile.
pub const ITEMS_FIELD: &str = "items";

/// Result of inserting one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// The key was new
    Inserted,
    /// The key existed and its record was replaced
    Replaced,
}

/// A profile template with its item collection split out for mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDocument {
    /// Template fields; the `items` slot holds a placeholder while `items` is split out
    root: Map<String, Value>,
    items: Map<String, Value>,
}

impl ProfileDocument {
    /// Builds a document from a parsed template.
    ///
    /// # Errors
    ///
    /// Returns [`LockerError::InvalidTemplate`] if `value` is not an object or has no
    /// `items` object. `origin` names the template in the error.
    pub fn from_value(origin: &str, value: Value) -> Result<Self, LockerError> {
        let Value::Object(mut root) = value else {
            return Err(LockerError::InvalidTemplate {
                path: origin.to_string(),
                reason: "template is not a JSON object".to_string(),
            });
        };

        let items = match root.get_mut(ITEMS_FIELD) {
            Some(Value::Object(items)) => std::mem::take(items),
            Some(_) => {
                return Err(LockerError::InvalidTemplate {
                    path: origin.to_string(),
                    reason: "`items` is not an object".to_string(),
                });
            }
            None => {
                return Err(LockerError::InvalidTemplate {
                    path: origin.to_string(),
                    reason: "missing `items` object".to_string(),
                });
            }
        };

        Ok(Self {
            root,
            items,
        })
    }

    /// Loads a template from disk.
    ///
    /// # Errors
    ///
    /// - [`LockerError::TemplateNotFound`] if `path` does not exist
    /// - [`LockerError::InvalidTemplate`] if it cannot be read, is not JSON, or lacks
    ///   an `items` object
    pub async fn load(path: &Path) -> Result<Self, LockerError> {
        let origin = path.display().to_string();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LockerError::TemplateNotFound {
                    path: origin.clone(),
                }
            } else {
                LockerError::InvalidTemplate {
                    path: origin.clone(),
                    reason: e.to_string(),
                }
            }
        })?;

        let value: Value =
            serde_json::from_str(&content).map_err(|e| LockerError::InvalidTemplate {
                path: origin.clone(),
                reason: format!("invalid JSON: {e}"),
            })?;

        Self::from_value(&origin, value)
    }

    /// A document holding only an empty `items` object.
    #[must_use]
    pub fn empty() -> Self {
        let mut root = Map::new();
        root.insert(ITEMS_FIELD.to_string(), Value::Null);
        Self {
            root,
            items: Map::new(),
        }
    }

    /// Inserts or replaces the record stored under the item's composite id.
    ///
    /// # Errors
    ///
    /// Returns [`LockerError::JsonError`] if the item cannot be converted to JSON.
    pub fn upsert_item(&mut self, item: &NormalizedItem) -> Result<Upsert, LockerError> {
        let value = serde_json::to_value(item)?;
        Ok(match self.items.insert(item.template_id.as_str().to_string(), value) {
            Some(_) => Upsert::Replaced,
            None => Upsert::Inserted,
        })
    }

    /// The item collection.
    #[must_use]
    pub fn items(&self) -> &Map<String, Value> {
        &self.items
    }

    /// The record stored under `id`.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&Value> {
        self.items.get(id)
    }

    /// A top-level template field other than `items`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        if name == ITEMS_FIELD {
            return None;
        }
        self.root.get(name)
    }

    /// Reassembles the full document.
    #[must_use]
    pub fn into_value(self) -> Value {
        let Self {
            mut root,
            items,
        } = self;
        if let Some(slot) = root.get_mut(ITEMS_FIELD) {
            *slot = Value::Object(items);
        }
        Value::Object(root)
    }

    /// Two-space indented JSON with keys in document order.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for ProfileDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.root.len()))?;
        for (key, value) in &self.root {
            if key == ITEMS_FIELD {
                map.serialize_entry(key, &self.items)?;
            } else {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}
