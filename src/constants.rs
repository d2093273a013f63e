//! Global constants used throughout the locker-gen codebase.
//!
//! This module holds the fixed endpoint, category markers and default file
//! locations shared by the catalog, normalizer and writer stages.

/// Catalog endpoint queried when no other endpoint is configured.
pub const DEFAULT_CATALOG_ENDPOINT: &str = "https://fortnite-api.com/v2/cosmetics";

/// Category whose items are always canonicalized to [`SONG_BACKEND_VALUE`].
pub const TRACKS_CATEGORY: &str = "tracks";

/// Backend value forced onto every item of the [`TRACKS_CATEGORY`] category.
pub const SONG_BACKEND_VALUE: &str = "SparksSong";

/// Category excluded from synthesis as a whole.
pub const LEGO_CATEGORY: &str = "lego";

/// Lowercase marker identifying placeholder (variant-roll) catalog entries.
pub const RANDOM_ID_MARKER: &str = "random";

/// Separator between the backend value and the raw id in a composite id.
pub const COMPOSITE_ID_SEPARATOR: char = ':';

/// Default location of the profile template, relative to the working directory.
pub const DEFAULT_TEMPLATE_PATH: &str = "profiles/athena_template.json";

/// Default location of the synthesized profile, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "profiles/athena.json";

/// Directory under the home directory holding the configuration file.
pub const CONFIG_DIR_NAME: &str = ".locker-gen";

/// File name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// User agent sent with catalog requests.
pub const USER_AGENT: &str = concat!("locker-gen/", env!("CARGO_PKG_VERSION"));
