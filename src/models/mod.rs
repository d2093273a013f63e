//! Shared data models for the profile document
//!
//! These are the normalized records the transformer produces and the profile
//! stores under `items`. Field names and field order follow the profile schema
//! consumed by the serving layer, so serialization order is part of the contract.

use crate::constants::COMPOSITE_ID_SEPARATOR;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of a normalized item: `<canonical backend value>:<raw id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompositeId(String);

impl CompositeId {
    /// Joins a canonical backend value and a raw catalog id.
    ///
    /// ```rust
    /// use locker_gen::models::CompositeId;
    ///
    /// let id = CompositeId::new("AthenaCharacter", "CID_001");
    /// assert_eq!(id.as_str(), "AthenaCharacter:CID_001");
    /// assert_eq!(id.backend_value(), "AthenaCharacter");
    /// assert_eq!(id.raw_id(), "CID_001");
    /// ```
    #[must_use]
    pub fn new(backend_value: &str, raw_id: &str) -> Self {
        Self(format!("{backend_value}{COMPOSITE_ID_SEPARATOR}{raw_id}"))
    }

    /// The full key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Segment before the first separator.
    ///
    /// Canonical backend values never contain the separator; raw ids may, so the
    /// split happens at the first one.
    #[must_use]
    pub fn backend_value(&self) -> &str {
        self.0.split_once(COMPOSITE_ID_SEPARATOR).map_or(self.0.as_str(), |(backend, _)| backend)
    }

    /// Segment after the first separator.
    #[must_use]
    pub fn raw_id(&self) -> &str {
        self.0.split_once(COMPOSITE_ID_SEPARATOR).map_or("", |(_, raw)| raw)
    }
}

impl fmt::Display for CompositeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<CompositeId> for String {
    fn from(id: CompositeId) -> Self {
        id.0
    }
}

/// A variant group with its active and owned options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedVariant {
    /// Variant channel, empty when the catalog omits it
    pub channel: String,
    /// Tag of the first option, empty when there is none
    pub active: String,
    /// Every option tag in catalog order
    pub owned: Vec<String>,
}

/// Per-item attributes. All but `variants` are fixed at synthesis time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAttributes {
    /// Always 0
    pub max_level_bonus: u32,
    /// Always 1
    pub level: u32,
    /// Always true
    pub item_seen: bool,
    /// Always 0
    pub xp: u64,
    /// Normalized variant groups
    pub variants: Vec<NormalizedVariant>,
    /// Always false
    pub favorite: bool,
}

impl ItemAttributes {
    /// Attributes of a freshly granted item with the given variants.
    #[must_use]
    pub const fn granted(variants: Vec<NormalizedVariant>) -> Self {
        Self {
            max_level_bonus: 0,
            level: 1,
            item_seen: true,
            xp: 0,
            variants,
            favorite: false,
        }
    }
}

/// A normalized profile item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedItem {
    /// Same as the key the item is stored under
    #[serde(rename = "templateId")]
    pub template_id: CompositeId,
    /// Item attributes
    pub attributes: ItemAttributes,
    /// Always 1
    pub quantity: u32,
}

impl NormalizedItem {
    /// A granted item keyed by `template_id`.
    #[must_use]
    pub const fn granted(template_id: CompositeId, variants: Vec<NormalizedVariant>) -> Self {
        Self {
            template_id,
            attributes: ItemAttributes::granted(variants),
            quantity: 1,
        }
    }
}
