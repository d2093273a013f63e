//! Common test utilities and fixtures for locker-gen integration tests

// Not every helper is used by every test file
#![allow(dead_code)]

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A scratch directory holding a template, a catalog snapshot and the output.
pub struct TestWorkspace {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    root: PathBuf,
}

impl TestWorkspace {
    /// Create an empty workspace with a `profiles/` directory
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().to_path_buf();
        fs::create_dir_all(root.join("profiles"))?;

        Ok(Self {
            _temp_dir: temp_dir,
            root,
        })
    }

    /// Create a workspace seeded with the sample template and catalog
    pub fn with_samples() -> Result<Self> {
        let workspace = Self::new()?;
        workspace.write_template(&locker_gen::test_utils::sample_template())?;
        workspace.write_catalog(&locker_gen::test_utils::sample_catalog())?;
        Ok(workspace)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn template_path(&self) -> PathBuf {
        self.root.join("profiles").join("athena_template.json")
    }

    pub fn output_path(&self) -> PathBuf {
        self.root.join("profiles").join("athena.json")
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root.join("cosmetics.json")
    }

    /// Config file location passed to the binary; absent unless a test writes it
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn write_template(&self, template: &Value) -> Result<()> {
        write_json(&self.template_path(), template)
    }

    pub fn write_catalog(&self, catalog: &Value) -> Result<()> {
        write_json(&self.catalog_path(), catalog)
    }

    pub fn read_output(&self) -> Result<Value> {
        let content = fs::read_to_string(self.output_path())
            .with_context(|| format!("Failed to read {}", self.output_path().display()))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// `locker-gen` command isolated from the user's configuration
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::cargo_bin("locker-gen").unwrap();
        cmd.current_dir(&self.root)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.config_path());
        cmd
    }
}

pub fn write_json(path: &Path, value: &Value) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(value)?)
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Keys of a JSON object in document order
pub fn keys(value: &Value) -> Vec<String> {
    value.as_object().map(|o| o.keys().cloned().collect()).unwrap_or_default()
}

/// Serves `body` with `status` (e.g. `"200 OK"`) to every connection and returns
/// the endpoint URL.
pub async fn serve_catalog(status: &'static str, body: String) -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let body = body.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                loop {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                    if request.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }

                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    Ok(format!("http://{addr}/v2/cosmetics"))
}
