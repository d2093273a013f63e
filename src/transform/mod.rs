//! Catalog entry → profile item transformation.
//!
//! [`ItemTransformer::transform`] turns one raw catalog entry into either a
//! [`NormalizedItem`] or a [`SkipReason`]. It performs no I/O and does not touch
//! the profile; accumulation is the caller's job (see [`crate::pipeline`]).
//!
//! # Skip rules
//!
//! Evaluated in order, first match wins:
//!
//! 1. entry is not an object or its `id` is not a string → [`SkipReason::NotAnItem`]
//! 2. category is `lego` → [`SkipReason::ExcludedCategory`]
//! 3. lowercased `id` contains `random` → [`SkipReason::PlaceholderId`]
//! 4. no backend value after canonicalization → [`SkipReason::MissingBackendValue`]
//!
//! Only the last one is worth a warning; the others are expected catalog noise.

use crate::alias::AliasTable;
use crate::catalog::{RawItem, RawVariant};
use crate::constants::{LEGO_CATEGORY, RANDOM_ID_MARKER};
use crate::models::{CompositeId, NormalizedItem, NormalizedVariant};
use serde_json::Value;
use std::fmt;

/// Why an entry produced no item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SkipReason {
    /// Absent entry or non-string `id`
    NotAnItem,
    /// The whole category is excluded
    ExcludedCategory,
    /// Placeholder entry whose id mentions `random`
    PlaceholderId,
    /// No backend value to build the composite id from
    MissingBackendValue,
}

impl SkipReason {
    /// Stable identifier used in logs and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotAnItem => "not_an_item",
            Self::ExcludedCategory => "excluded_category",
            Self::PlaceholderId => "placeholder_id",
            Self::MissingBackendValue => "missing_backend_value",
        }
    }

    /// Whether the skip is routine and needs no warning.
    #[must_use]
    pub const fn is_silent(self) -> bool {
        !matches!(self, Self::MissingBackendValue)
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of transforming one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transformed {
    /// The entry became a profile item
    Item(NormalizedItem),
    /// The entry was skipped
    Skip(SkipReason),
}

impl Transformed {
    /// The item, if the entry was not skipped.
    #[must_use]
    pub fn into_item(self) -> Option<NormalizedItem> {
        match self {
            Self::Item(item) => Some(item),
            Self::Skip(_) => None,
        }
    }
}

/// Validates catalog entries and builds normalized items.
#[derive(Debug, Clone, Copy)]
pub struct ItemTransformer<'a> {
    aliases: &'a AliasTable,
}

impl<'a> ItemTransformer<'a> {
    /// Creates a transformer canonicalizing through `aliases`.
    #[must_use]
    pub const fn new(aliases: &'a AliasTable) -> Self {
        Self {
            aliases,
        }
    }

    /// Whether every entry of `category` is skipped.
    #[must_use]
    pub fn is_excluded_category(category: &str) -> bool {
        category == LEGO_CATEGORY
    }

    /// Transforms one catalog entry of `category`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use locker_gen::alias::AliasTable;
    /// use locker_gen::transform::{ItemTransformer, SkipReason, Transformed};
    /// use serde_json::json;
    ///
    /// let aliases = AliasTable::builtin();
    /// let transformer = ItemTransformer::new(&aliases);
    ///
    /// let entry = json!({ "id": "EID_Floss", "type": { "backendValue": "AthenaEmoji" } });
    /// let item = transformer.transform("br", &entry).into_item().unwrap();
    /// assert_eq!(item.template_id.as_str(), "AthenaDance:EID_Floss");
    ///
    /// let placeholder = json!({ "id": "Random_Skin", "type": { "backendValue": "AthenaCharacter" } });
    /// assert_eq!(transformer.transform("br", &placeholder), Transformed::Skip(SkipReason::PlaceholderId));
    /// ```
    #[must_use]
    pub fn transform(&self, category: &str, entry: &Value) -> Transformed {
        let Some(raw) = RawItem::parse(entry) else {
            return Transformed::Skip(SkipReason::NotAnItem);
        };

        if Self::is_excluded_category(category) {
            return Transformed::Skip(SkipReason::ExcludedCategory);
        }

        if raw.id.to_lowercase().contains(RANDOM_ID_MARKER) {
            return Transformed::Skip(SkipReason::PlaceholderId);
        }

        let Ok(backend_value) = self.aliases.canonicalize(category, raw.backend_value) else {
            return Transformed::Skip(SkipReason::MissingBackendValue);
        };

        let template_id = CompositeId::new(backend_value, raw.id);
        let variants = raw.variants.iter().map(normalize_variant).collect();

        Transformed::Item(NormalizedItem::granted(template_id, variants))
    }
}

/// Flattens a variant group. Options without a tag contribute an empty string to
/// `owned` so the list stays homogeneous.
fn normalize_variant(variant: &RawVariant<'_>) -> NormalizedVariant {
    let options = variant.options.as_deref().unwrap_or_default();

    NormalizedVariant {
        channel: variant.channel.unwrap_or_default().to_string(),
        active: options.first().and_then(|o| o.tag).unwrap_or_default().to_string(),
        owned: options.iter().map(|o| o.tag.unwrap_or_default().to_string()).collect(),
    }
}
