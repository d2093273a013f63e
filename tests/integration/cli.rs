//! Integration tests for the `locker-gen` binary.

use crate::common::{TestWorkspace, keys};
use anyhow::Result;
use predicates::prelude::*;

#[test]
fn test_generate_from_catalog_file() -> Result<()> {
    let workspace = TestWorkspace::with_samples()?;

    workspace
        .command()
        .arg("generate")
        .arg("--catalog-file")
        .arg(workspace.catalog_path())
        .arg("--template")
        .arg(workspace.template_path())
        .arg("--output")
        .arg(workspace.output_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 4 items"));

    let profile = workspace.read_output()?;
    assert_eq!(keys(&profile["items"]).len(), 5);
    Ok(())
}

#[test]
fn test_generate_uses_configured_paths() -> Result<()> {
    let workspace = TestWorkspace::with_samples()?;
    std::fs::write(
        workspace.config_path(),
        format!(
            "template = {:?}\noutput = {:?}\n\n[aliases]\nAthenaEmoji = \"AthenaEmoji\"\n",
            workspace.template_path().display().to_string(),
            workspace.output_path().display().to_string()
        ),
    )?;

    workspace
        .command()
        .arg("generate")
        .arg("--catalog-file")
        .arg(workspace.catalog_path())
        .assert()
        .success();

    let profile = workspace.read_output()?;
    assert!(profile["items"]["AthenaEmoji:EID_Floss"].is_object());
    assert!(profile["items"]["AthenaDance:EID_Floss"].is_null());
    Ok(())
}

#[test]
fn test_generate_missing_template_fails() -> Result<()> {
    let workspace = TestWorkspace::new()?;
    workspace.write_catalog(&locker_gen::test_utils::sample_catalog())?;

    workspace
        .command()
        .arg("generate")
        .arg("--catalog-file")
        .arg(workspace.catalog_path())
        .arg("--template")
        .arg(workspace.root().join("nope.json"))
        .arg("--output")
        .arg(workspace.output_path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Profile template not found"));

    assert!(!workspace.output_path().exists());
    Ok(())
}

#[test]
fn test_generate_missing_catalog_file_fails() -> Result<()> {
    let workspace = TestWorkspace::with_samples()?;

    workspace
        .command()
        .arg("generate")
        .arg("--catalog-file")
        .arg(workspace.root().join("absent.json"))
        .arg("--template")
        .arg(workspace.template_path())
        .arg("--output")
        .arg(workspace.output_path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Catalog source unavailable"))
        .stderr(predicate::str::contains("absent.json: "));
    Ok(())
}

#[test]
fn test_config_path_prints_override() -> Result<()> {
    let workspace = TestWorkspace::new()?;

    workspace
        .command()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
    Ok(())
}

#[test]
fn test_config_init_then_show() -> Result<()> {
    let workspace = TestWorkspace::new()?;

    workspace.command().args(["config", "init"]).assert().success();
    assert!(workspace.config_path().exists());

    workspace
        .command()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("profiles/athena.json"));
    Ok(())
}

#[test]
fn test_aliases_lists_builtin_table() -> Result<()> {
    let workspace = TestWorkspace::new()?;

    workspace
        .command()
        .arg("aliases")
        .assert()
        .success()
        .stdout(predicate::str::contains("AthenaEmoji"))
        .stdout(predicate::str::contains("AthenaDance"));
    Ok(())
}

#[test]
fn test_aliases_json_includes_configured_entries() -> Result<()> {
    let workspace = TestWorkspace::new()?;
    std::fs::write(workspace.config_path(), "[aliases]\nJunoBuildingSet = \"JunoBuildingProp\"\n")?;

    let output = workspace.command().args(["aliases", "--json"]).output()?;
    assert!(output.status.success());

    let table: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(table["JunoBuildingSet"], "JunoBuildingProp");
    assert_eq!(table["AthenaPet"], "AthenaBackpack");
    Ok(())
}
