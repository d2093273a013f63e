//! Pipeline behavior against file-backed catalogs.

use crate::common::{TestWorkspace, keys, write_json};
use anyhow::Result;
use locker_gen::alias::AliasTable;
use locker_gen::catalog::FileCatalogSource;
use locker_gen::core::LockerError;
use locker_gen::pipeline;
use locker_gen::test_utils::{catalog_envelope, init_test_logging};
use locker_gen::transform::SkipReason;
use serde_json::json;

async fn generate(workspace: &TestWorkspace) -> Result<pipeline::RunOutcome, LockerError> {
    pipeline::run(
        &FileCatalogSource::new(workspace.catalog_path()),
        &AliasTable::builtin(),
        &workspace.template_path(),
        &workspace.output_path(),
    )
    .await
}

#[tokio::test]
async fn test_end_to_end_example() -> Result<()> {
    init_test_logging(None);
    let workspace = TestWorkspace::new()?;
    workspace.write_template(&json!({ "items": {} }))?;
    workspace.write_catalog(&catalog_envelope(json!({
        "cosmetics": [
            { "id": "CID_001", "type": { "backendValue": "AthenaCharacter" }, "variants": [] },
            { "id": "Random_Skin", "type": { "backendValue": "AthenaCharacter" } }
        ]
    })))?;

    let outcome = generate(&workspace).await?;

    let profile = workspace.read_output()?;
    assert_eq!(keys(&profile["items"]), vec!["AthenaCharacter:CID_001"]);
    assert_eq!(
        profile["items"]["AthenaCharacter:CID_001"],
        json!({
            "templateId": "AthenaCharacter:CID_001",
            "attributes": {
                "max_level_bonus": 0,
                "level": 1,
                "item_seen": true,
                "xp": 0,
                "variants": [],
                "favorite": false
            },
            "quantity": 1
        })
    );
    assert_eq!(outcome.report.items_written, 1);
    assert_eq!(outcome.report.skipped_for(SkipReason::PlaceholderId), 1);
    Ok(())
}

#[tokio::test]
async fn test_sample_catalog_merges_into_template() -> Result<()> {
    let workspace = TestWorkspace::with_samples()?;

    let outcome = generate(&workspace).await?;

    let profile = workspace.read_output()?;
    assert_eq!(keys(&profile), vec!["_id", "created", "profileId", "version", "items", "stats", "rvn"]);
    assert_eq!(
        keys(&profile["items"]),
        vec![
            "AthenaPickaxe:DefaultPickaxe",
            "AthenaCharacter:CID_001",
            "AthenaDance:EID_Floss",
            "AthenaBackpack:PetCarrier_001",
            "SparksSong:sid_placeholder_01"
        ]
    );
    assert_eq!(profile["rvn"], json!(0));
    assert_eq!(profile["stats"]["attributes"]["level"], json!(100));

    let variants = &profile["items"]["AthenaCharacter:CID_001"]["attributes"]["variants"];
    assert_eq!(variants, &json!([{ "channel": "Material", "active": "Mat1", "owned": ["Mat1", "Mat2"] }]));

    let report = &outcome.report;
    assert_eq!(report.categories_processed, 2);
    assert_eq!(report.categories_excluded, 1);
    assert_eq!(report.items_written, 4);
    assert_eq!(report.skipped_for(SkipReason::PlaceholderId), 1);
    assert_eq!(report.skipped_for(SkipReason::MissingBackendValue), 1);
    Ok(())
}

#[tokio::test]
async fn test_every_written_key_matches_its_template_id() -> Result<()> {
    let workspace = TestWorkspace::with_samples()?;
    generate(&workspace).await?;

    let profile = workspace.read_output()?;
    for (key, item) in profile["items"].as_object().unwrap() {
        assert_eq!(item["templateId"], json!(key));
    }
    Ok(())
}

#[tokio::test]
async fn test_no_excluded_or_placeholder_items_written() -> Result<()> {
    let workspace = TestWorkspace::with_samples()?;
    generate(&workspace).await?;

    let profile = workspace.read_output()?;
    for key in keys(&profile["items"]) {
        assert!(!key.to_lowercase().contains("random"), "{key}");
        assert!(!key.contains("Lego"), "{key}");
    }
    Ok(())
}

#[tokio::test]
async fn test_regeneration_is_additive() -> Result<()> {
    let workspace = TestWorkspace::with_samples()?;
    generate(&workspace).await?;

    // Feed the generated profile back in as the template with a smaller catalog
    std::fs::copy(workspace.output_path(), workspace.template_path())?;
    workspace.write_catalog(&catalog_envelope(json!({
        "br": [{ "id": "CID_002", "type": { "backendValue": "AthenaCharacter" } }]
    })))?;

    let outcome = generate(&workspace).await?;

    let profile = workspace.read_output()?;
    assert_eq!(profile["items"].as_object().unwrap().len(), 6);
    assert!(profile["items"]["AthenaDance:EID_Floss"].is_object());
    assert!(profile["items"]["AthenaCharacter:CID_002"].is_object());
    assert_eq!(outcome.report.items_replaced, 0);
    Ok(())
}

#[tokio::test]
async fn test_template_item_is_replaced_in_place() -> Result<()> {
    let workspace = TestWorkspace::new()?;
    workspace.write_template(&json!({
        "items": {
            "AthenaCharacter:CID_001": { "templateId": "AthenaCharacter:CID_001", "quantity": 7 },
            "AthenaPickaxe:DefaultPickaxe": { "quantity": 1 }
        }
    }))?;
    workspace.write_catalog(&catalog_envelope(json!({
        "br": [{ "id": "CID_001", "type": { "backendValue": "AthenaCharacter" } }]
    })))?;

    let outcome = generate(&workspace).await?;

    let profile = workspace.read_output()?;
    assert_eq!(keys(&profile["items"]), vec!["AthenaCharacter:CID_001", "AthenaPickaxe:DefaultPickaxe"]);
    assert_eq!(profile["items"]["AthenaCharacter:CID_001"]["quantity"], json!(1));
    assert_eq!(outcome.report.items_replaced, 1);
    Ok(())
}

#[tokio::test]
async fn test_invalid_template_leaves_output_untouched() -> Result<()> {
    let workspace = TestWorkspace::with_samples()?;
    write_json(&workspace.template_path(), &json!({ "_id": "athena" }))?;
    std::fs::write(workspace.output_path(), "previous")?;

    let err = generate(&workspace).await.unwrap_err();

    assert!(matches!(err, LockerError::InvalidTemplate { .. }));
    assert_eq!(std::fs::read_to_string(workspace.output_path())?, "previous");
    Ok(())
}

#[tokio::test]
async fn test_malformed_catalog_leaves_output_untouched() -> Result<()> {
    let workspace = TestWorkspace::with_samples()?;
    workspace.write_catalog(&json!({ "status": 404, "error": "not found" }))?;
    std::fs::write(workspace.output_path(), "previous")?;

    let err = generate(&workspace).await.unwrap_err();

    assert!(matches!(err, LockerError::MalformedEnvelope { .. }));
    assert_eq!(std::fs::read_to_string(workspace.output_path())?, "previous");
    Ok(())
}

#[tokio::test]
async fn test_missing_output_directory_is_write_failure() -> Result<()> {
    let workspace = TestWorkspace::with_samples()?;
    let output = workspace.root().join("missing").join("athena.json");

    let err = pipeline::run(
        &FileCatalogSource::new(workspace.catalog_path()),
        &AliasTable::builtin(),
        &workspace.template_path(),
        &output,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, LockerError::WriteFailure { .. }));
    assert!(!output.parent().unwrap().exists());
    Ok(())
}

#[tokio::test]
async fn test_concurrent_runs_on_same_output_do_not_interleave() -> Result<()> {
    let workspace = TestWorkspace::with_samples()?;

    let (first, second) = tokio::join!(generate(&workspace), generate(&workspace));
    first?;
    second?;

    // Both runs completed and the file is one complete document
    let profile = workspace.read_output()?;
    assert_eq!(profile["items"].as_object().unwrap().len(), 5);
    Ok(())
}
