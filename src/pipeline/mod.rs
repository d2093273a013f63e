//! The synthesis pipeline.
//!
//! A run goes through four steps, each of which may abort it:
//!
//! ```text
//! lock destination → load template → fetch catalog → synthesize → persist
//! ```
//!
//! Per-item problems never abort [`synthesize`]: they become skips recorded in the
//! [`SynthesisReport`]. Everything before persisting leaves an existing profile
//! untouched.

use crate::alias::AliasTable;
use crate::catalog::{CatalogSnapshot, CatalogSource};
use crate::core::LockerError;
use crate::profile::{PersistedProfile, ProfileDocument, ProfileWriter, Upsert};
use crate::transform::{ItemTransformer, SkipReason, Transformed};
use crate::utils::OutputLock;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Counts gathered while synthesizing one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthesisReport {
    /// Categories whose entries were transformed
    pub categories_processed: usize,
    /// Categories excluded as a whole
    pub categories_excluded: usize,
    /// Entries seen in processed categories
    pub items_seen: usize,
    /// Items upserted into the profile
    pub items_written: usize,
    /// Upserts that replaced an existing key
    pub items_replaced: usize,
    /// Skipped entries per reason
    pub skipped: BTreeMap<SkipReason, usize>,
}

impl SynthesisReport {
    /// Total skipped entries.
    #[must_use]
    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }

    /// Skips recorded for `reason`.
    #[must_use]
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    fn record_skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_insert(0) += 1;
    }
}

/// Transforms every entry of `snapshot` and upserts the results into `document`.
///
/// Categories and entries are visited in snapshot order, so on a key collision the
/// entry appearing last wins.
///
/// # Errors
///
/// Returns [`LockerError::JsonError`] if a normalized item cannot be converted to JSON.
pub fn synthesize(
    snapshot: &CatalogSnapshot,
    aliases: &AliasTable,
    document: &mut ProfileDocument,
) -> Result<SynthesisReport, LockerError> {
    let transformer = ItemTransformer::new(aliases);
    let mut report = SynthesisReport::default();

    for category in snapshot.categories() {
        if ItemTransformer::is_excluded_category(&category.name) {
            debug!(category = %category.name, entries = category.items.len(), "Skipping excluded category");
            report.categories_excluded += 1;
            continue;
        }

        report.categories_processed += 1;
        for entry in &category.items {
            report.items_seen += 1;
            match transformer.transform(&category.name, entry) {
                Transformed::Item(item) => {
                    if document.upsert_item(&item)? == Upsert::Replaced {
                        debug!(id = %item.template_id, "Replaced existing profile item");
                        report.items_replaced += 1;
                    }
                    report.items_written += 1;
                }
                Transformed::Skip(reason) if reason.is_silent() => {
                    debug!(category = %category.name, %reason, "Skipping catalog entry");
                    report.record_skip(reason);
                }
                Transformed::Skip(reason) => {
                    warn!(category = %category.name, %reason, item = %entry, "Skipping catalog entry");
                    report.record_skip(reason);
                }
            }
        }
    }

    Ok(report)
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// What happened to each catalog entry
    pub report: SynthesisReport,
    /// Where and what was written
    pub persisted: PersistedProfile,
}

/// Runs the full pipeline: fetch `source`, merge it into the template at
/// `template`, and write the result to `output`.
///
/// Concurrent runs targeting the same `output` are serialized by an exclusive lock
/// held for the whole run.
///
/// # Errors
///
/// Any [`LockerError`] from locking, template loading, fetching or writing. Only
/// [`LockerError::WriteFailure`] can happen after the destination was touched.
pub async fn run<S: CatalogSource>(
    source: &S,
    aliases: &AliasTable,
    template: &Path,
    output: &Path,
) -> Result<RunOutcome, LockerError> {
    info!(
        source = %source.origin(),
        template = %template.display(),
        output = %output.display(),
        "Generating profile"
    );

    let _lock = OutputLock::acquire(output).await?;

    let mut document = ProfileDocument::load(template).await?;
    debug!(template = %template.display(), items = document.items().len(), "Loaded profile template");

    let snapshot = match source.fetch().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!(source = %source.origin(), error = %e, "Failed to fetch catalog");
            return Err(e);
        }
    };
    debug!(
        categories = snapshot.categories().len(),
        entries = snapshot.item_count(),
        "Fetched catalog"
    );

    let report = synthesize(&snapshot, aliases, &mut document)?;
    info!(
        categories = report.categories_processed,
        excluded = report.categories_excluded,
        written = report.items_written,
        replaced = report.items_replaced,
        skipped = report.skipped_total(),
        "Synthesized profile items"
    );

    let persisted = ProfileWriter::new().finalize(document, output).await?;
    info!(path = %persisted.path.display(), size = %persisted.size, "Profile written successfully");
    debug!(sha256 = %persisted.sha256, "Profile digest");

    Ok(RunOutcome {
        report,
        persisted,
    })
}
