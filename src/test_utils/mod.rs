//! Test utilities for locker-gen
//!
//! Logging setup and catalog/template fixtures shared by unit and integration
//! tests. Enabled for unit tests and, through the `test-utils` feature, for the
//! integration suite.

use serde_json::{Value, json};
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. With `level` set, that level is used;
/// otherwise `RUST_LOG` is honored, and without either nothing is logged.
///
/// ```bash
/// RUST_LOG=locker_gen=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// Wraps `categories` in the provider envelope.
#[must_use]
pub fn catalog_envelope(categories: Value) -> Value {
    json!({ "status": 200, "data": categories })
}

/// A small catalog covering aliases, the `tracks` override, the `lego`
/// exclusion, placeholder ids and an entry without a backend value.
///
/// It produces exactly four items:
///
/// | key | from |
/// |---|---|
/// | `AthenaCharacter:CID_001` | `br` |
/// | `AthenaDance:EID_Floss` | `br` (`AthenaEmoji` alias) |
/// | `AthenaBackpack:PetCarrier_001` | `br` (`AthenaPetCarrier` alias) |
/// | `SparksSong:sid_placeholder_01` | `tracks` |
#[must_use]
pub fn sample_catalog() -> Value {
    catalog_envelope(json!({
        "br": [
            {
                "id": "CID_001",
                "type": { "value": "outfit", "backendValue": "AthenaCharacter" },
                "variants": [
                    {
                        "channel": "Material",
                        "options": [{ "tag": "Mat1", "name": "Default" }, { "tag": "Mat2", "name": "Gold" }]
                    }
                ]
            },
            { "id": "EID_Floss", "type": { "value": "emote", "backendValue": "AthenaEmoji" } },
            { "id": "PetCarrier_001", "type": { "backendValue": "AthenaPetCarrier" }, "variants": [] },
            { "id": "CID_Random", "type": { "backendValue": "AthenaCharacter" } },
            { "id": "CID_NoType" }
        ],
        "tracks": [
            { "id": "sid_placeholder_01", "title": "Placeholder" }
        ],
        "lego": [
            { "id": "Character_Lego_001", "type": { "backendValue": "JunoCharacter" } }
        ]
    }))
}

/// A minimal template with one pre-existing item and a few non-item fields.
#[must_use]
pub fn sample_template() -> Value {
    json!({
        "_id": "athena",
        "created": "2024-01-01T00:00:00.000Z",
        "profileId": "athena",
        "version": "locker_gen",
        "items": {
            "AthenaPickaxe:DefaultPickaxe": {
                "templateId": "AthenaPickaxe:DefaultPickaxe",
                "attributes": { "level": 1, "item_seen": true },
                "quantity": 1
            }
        },
        "stats": { "attributes": { "level": 100 } },
        "rvn": 0
    })
}
