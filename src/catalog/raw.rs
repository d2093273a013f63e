//! Lenient, borrowed views over raw catalog entries.
//!
//! The catalog is an external, loosely specified input: any field may be missing
//! or carry an unexpected type. Rather than failing deserialization of a whole
//! category, each entry is kept as a [`serde_json::Value`] and read through these
//! views. A field of the wrong type (or an empty string) reads as absent.

use serde_json::Value;

/// A catalog item that passed the identity check (`id` is a string).
#[derive(Debug, Clone, PartialEq)]
pub struct RawItem<'a> {
    /// Raw item id, unique within its category
    pub id: &'a str,
    /// `type.backendValue`, if present and non-empty
    pub backend_value: Option<&'a str>,
    /// Variant groups; empty when `variants` is absent or not a list
    pub variants: Vec<RawVariant<'a>>,
    /// The untouched JSON entry, kept for diagnostics
    pub payload: &'a Value,
}

/// One selectable variant group of a catalog item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawVariant<'a> {
    /// Variant channel (e.g. `Material`), if present and non-empty
    pub channel: Option<&'a str>,
    /// Options of the group; `None` when `options` is absent or not a list
    pub options: Option<Vec<RawOption<'a>>>,
}

/// One option within a variant group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawOption<'a> {
    /// Option tag, if present and non-empty
    pub tag: Option<&'a str>,
}

impl<'a> RawItem<'a> {
    /// Reads a catalog entry.
    ///
    /// Returns `None` when the entry is not an object or its `id` is not a string;
    /// such entries carry no identity and are skipped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use locker_gen::catalog::RawItem;
    /// use serde_json::json;
    ///
    /// let entry = json!({ "id": "CID_001", "type": { "backendValue": "AthenaCharacter" } });
    /// let item = RawItem::parse(&entry).unwrap();
    /// assert_eq!(item.id, "CID_001");
    /// assert_eq!(item.backend_value, Some("AthenaCharacter"));
    ///
    /// assert!(RawItem::parse(&json!({ "id": 42 })).is_none());
    /// ```
    #[must_use]
    pub fn parse(value: &'a Value) -> Option<Self> {
        let id = value.as_object()?.get("id")?.as_str()?;

        let backend_value =
            non_empty_str(value.get("type").and_then(|t| t.get("backendValue")));

        let variants = value
            .get("variants")
            .and_then(Value::as_array)
            .map(|variants| variants.iter().map(RawVariant::parse).collect())
            .unwrap_or_default();

        Some(Self {
            id,
            backend_value,
            variants,
            payload: value,
        })
    }
}

impl<'a> RawVariant<'a> {
    /// Reads a variant group. Never fails; unusable fields read as absent.
    #[must_use]
    pub fn parse(value: &'a Value) -> Self {
        let options = value.get("options").and_then(Value::as_array).map(|options| {
            options
                .iter()
                .map(|option| RawOption {
                    tag: non_empty_str(option.get("tag")),
                })
                .collect()
        });

        Self {
            channel: non_empty_str(value.get("channel")),
            options,
        }
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}
