//! locker-gen - synthesize a locker profile from a cosmetics catalog
//!
//! locker-gen fetches the full cosmetics catalog from a provider, normalizes every
//! item into a uniform "granted" profile record, and merges those records into a
//! profile template. The result is a single JSON document in which every known
//! cosmetic is owned with all of its variants unlocked.
//!
//! # Pipeline
//!
//! ```text
//! CatalogSource ──► ItemTransformer ──► ProfileDocument ──► ProfileWriter
//!  (fetch once)      (AliasTable,        (template +         (write-then-
//!                     skip rules)         upserts)            rename)
//! ```
//!
//! 1. [`catalog`] retrieves the `{ "data": { <category>: [items] } }` envelope
//! 2. [`transform`] validates each entry and builds a [`models::NormalizedItem`],
//!    canonicalizing its backend value through [`alias::AliasTable`]
//! 3. [`profile`] accumulates items in the template, last write wins on collisions
//! 4. [`profile::ProfileWriter`] persists the document exactly once
//!
//! [`pipeline::run`] drives all four steps. Per-item problems are skips, never errors;
//! any failure at a boundary aborts the run before the destination is touched.
//!
//! # Example
//!
//! ```rust,no_run
//! use locker_gen::alias::AliasTable;
//! use locker_gen::catalog::FileCatalogSource;
//! use locker_gen::pipeline;
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let source = FileCatalogSource::new("cosmetics.json");
//! let outcome = pipeline::run(
//!     &source,
//!     &AliasTable::builtin(),
//!     Path::new("profiles/athena_template.json"),
//!     Path::new("profiles/athena.json"),
//! )
//! .await?;
//! println!("{} items, {}", outcome.report.items_written, outcome.persisted.size);
//! # Ok(())
//! # }
//! ```

// Pipeline stages
pub mod alias;
pub mod catalog;
pub mod pipeline;
pub mod profile;
pub mod transform;

// Shared types
pub mod constants;
pub mod core;
pub mod models;

// Supporting modules
pub mod cli;
pub mod config;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
