//! Tests for output determinism

use crate::common::TestWorkspace;
use anyhow::Result;
use locker_gen::alias::AliasTable;
use locker_gen::catalog::FileCatalogSource;
use locker_gen::pipeline;
use std::collections::HashSet;

/// Identical catalog and template must produce byte-identical profiles.
#[tokio::test]
async fn test_profile_determinism_5_runs() -> Result<()> {
    locker_gen::test_utils::init_test_logging(None);
    let workspace = TestWorkspace::with_samples()?;
    let source = FileCatalogSource::new(workspace.catalog_path());

    let mut contents = HashSet::new();
    let mut digests = HashSet::new();
    for _ in 0..5 {
        let outcome = pipeline::run(
            &source,
            &AliasTable::builtin(),
            &workspace.template_path(),
            &workspace.output_path(),
        )
        .await?;
        digests.insert(outcome.persisted.sha256);
        contents.insert(std::fs::read(workspace.output_path())?);
    }

    assert_eq!(contents.len(), 1, "profile content differs between runs");
    assert_eq!(digests.len(), 1, "profile digest differs between runs");
    Ok(())
}

#[tokio::test]
async fn test_output_format() -> Result<()> {
    let workspace = TestWorkspace::with_samples()?;
    let outcome = pipeline::run(
        &FileCatalogSource::new(workspace.catalog_path()),
        &AliasTable::builtin(),
        &workspace.template_path(),
        &workspace.output_path(),
    )
    .await?;

    let text = std::fs::read_to_string(workspace.output_path())?;
    assert!(text.starts_with("{\n  \"_id\": \"athena\",\n"));
    assert!(text.ends_with('}'), "no trailing newline expected");
    assert_eq!(outcome.persisted.size.bytes(), text.len() as u64);
    Ok(())
}
