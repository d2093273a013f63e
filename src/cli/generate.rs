//! Generate the profile.
//!
//! # Examples
//!
//! ```bash
//! # Live catalog, configured paths
//! locker-gen generate
//!
//! # Saved catalog snapshot, explicit paths
//! locker-gen generate --catalog-file cosmetics.json \
//!     --template profiles/athena_template.json --output profiles/athena.json
//! ```

use crate::alias::AliasTable;
use crate::catalog::{CatalogSource, FileCatalogSource, HttpCatalogSource};
use crate::config::GeneratorConfig;
use crate::pipeline::{self, RunOutcome};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Arguments of `locker-gen generate`.
#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// Catalog endpoint (overrides the configured one)
    #[arg(long, value_name = "URL", conflicts_with = "catalog_file")]
    endpoint: Option<String>,

    /// Read the catalog envelope from a local file instead of the network
    #[arg(long, value_name = "PATH")]
    catalog_file: Option<PathBuf>,

    /// Profile template to merge into
    #[arg(short, long, value_name = "PATH")]
    template: Option<PathBuf>,

    /// Where to write the synthesized profile
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

impl GenerateCommand {
    /// Runs the pipeline with flags layered over `config`.
    pub async fn execute(self, config: &GeneratorConfig) -> Result<()> {
        let template = self.template.unwrap_or_else(|| config.template_path());
        let output = self.output.unwrap_or_else(|| config.output_path());

        let aliases = config.alias_table();
        let chained = aliases.chained_entries();
        if !chained.is_empty() {
            warn!(entries = ?chained, "Alias targets are themselves aliased; only one level is applied");
        }

        let outcome = match self.catalog_file {
            Some(path) => run(&FileCatalogSource::new(path), &aliases, &template, &output).await?,
            None => {
                let endpoint = self.endpoint.unwrap_or_else(|| config.endpoint.clone());
                let source = HttpCatalogSource::new(endpoint)?;
                run(&source, &aliases, &template, &output).await?
            }
        };

        let report = &outcome.report;
        println!(
            "{} Wrote {} items to {} ({}, {} replaced, {} skipped)",
            "✓".green(),
            report.items_written,
            outcome.persisted.path.display(),
            outcome.persisted.size,
            report.items_replaced,
            report.skipped_total()
        );

        Ok(())
    }
}

async fn run<S: CatalogSource>(
    source: &S,
    aliases: &AliasTable,
    template: &Path,
    output: &Path,
) -> Result<RunOutcome> {
    pipeline::run(source, aliases, template, output)
        .await
        .with_context(|| format!("Failed to generate profile from {}", source.origin()))
}
