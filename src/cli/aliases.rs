//! Print the effective alias table.

use crate::config::GeneratorConfig;
use anyhow::Result;
use clap::Args;
use colored::Colorize;

/// Arguments of `locker-gen aliases`.
#[derive(Args, Debug)]
pub struct AliasesCommand {
    /// Print the table as a JSON object
    #[arg(long)]
    json: bool,
}

impl AliasesCommand {
    /// Prints built-in aliases with configured ones layered on top, sorted by raw value.
    pub fn execute(self, config: &GeneratorConfig) -> Result<()> {
        let table = config.alias_table();

        if self.json {
            let map: serde_json::Map<String, serde_json::Value> = table
                .iter()
                .map(|(raw, canonical)| (raw.to_string(), canonical.into()))
                .collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
            return Ok(());
        }

        let width = table.iter().map(|(raw, _)| raw.len()).max().unwrap_or(0);
        for (raw, canonical) in table.iter() {
            let marker = if config.aliases.contains_key(raw) {
                " (configured)".dimmed().to_string()
            } else {
                String::new()
            };
            println!("{raw:<width$} -> {}{marker}", canonical.cyan());
        }

        Ok(())
    }
}
