//! Backend value canonicalization.
//!
//! The catalog labels each item with a raw `backendValue`. Several raw values
//! share a single category in the profile, so they are folded through a fixed
//! alias table before the composite id is built. One category overrides the table
//! entirely: every item of `tracks` becomes a song regardless of its own label.
//!
//! The table is an explicit value rather than process-wide state so tests and
//! callers can inject their own entries.

use crate::constants::{SONG_BACKEND_VALUE, TRACKS_CATEGORY};
use std::collections::BTreeMap;
use thiserror::Error;

/// Built-in raw → canonical backend values.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("AthenaEmoji", "AthenaDance"),
    ("AthenaSpray", "AthenaDance"),
    ("AthenaToy", "AthenaDance"),
    ("AthenaPetCarrier", "AthenaBackpack"),
    ("AthenaPet", "AthenaBackpack"),
    ("SparksDrum", "SparksDrums"),
    ("SparksMic", "SparksMicrophone"),
];

/// The item carried no usable backend value and no category override applied.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("item has no backend value")]
pub struct MissingBackendValue;

/// Mapping from raw backend values to their canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: BTreeMap<String, String>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AliasTable {
    /// The built-in table.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_ALIASES
                .iter()
                .map(|(raw, canonical)| ((*raw).to_string(), (*canonical).to_string()))
                .collect(),
        }
    }

    /// A table without any aliases; every raw value is already canonical.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Layers `overrides` on top of this table. An override for an existing raw
    /// value replaces the built-in target.
    #[must_use]
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (raw, canonical) in overrides {
            self.entries.insert(raw.into(), canonical.into());
        }
        self
    }

    /// Looks up the alias of `raw`, if any.
    #[must_use]
    pub fn resolve(&self, raw: &str) -> Option<&str> {
        self.entries.get(raw).map(String::as_str)
    }

    /// Canonicalizes the backend value of an item in `category`.
    ///
    /// 1. `tracks` items always become [`SONG_BACKEND_VALUE`]
    /// 2. a raw value found in the table becomes its alias
    /// 3. any other raw value is returned unchanged
    ///
    /// # Errors
    ///
    /// Returns [`MissingBackendValue`] when `raw` is `None` outside `tracks`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use locker_gen::alias::AliasTable;
    ///
    /// let table = AliasTable::builtin();
    /// assert_eq!(table.canonicalize("br", Some("AthenaEmoji")), Ok("AthenaDance"));
    /// assert_eq!(table.canonicalize("br", Some("AthenaCharacter")), Ok("AthenaCharacter"));
    /// assert_eq!(table.canonicalize("tracks", None), Ok("SparksSong"));
    /// assert!(table.canonicalize("br", None).is_err());
    /// ```
    pub fn canonicalize<'a>(
        &'a self,
        category: &str,
        raw: Option<&'a str>,
    ) -> Result<&'a str, MissingBackendValue> {
        if category == TRACKS_CATEGORY {
            return Ok(SONG_BACKEND_VALUE);
        }

        let raw = raw.ok_or(MissingBackendValue)?;
        Ok(self.resolve(raw).unwrap_or(raw))
    }

    /// Entries sorted by raw value.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(raw, canonical)| (raw.as_str(), canonical.as_str()))
    }

    /// Number of aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no aliases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw values whose alias is itself aliased again.
    ///
    /// Canonicalization applies the table once, so a chained entry would make
    /// canonicalizing a canonical value change it.
    #[must_use]
    pub fn chained_entries(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(raw, canonical)| raw != canonical && self.entries.contains_key(*canonical))
            .map(|(raw, _)| raw.as_str())
            .collect()
    }
}
