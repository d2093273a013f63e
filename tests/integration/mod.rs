//! Integration test suite for locker-gen
//!
//! End-to-end tests of the synthesis pipeline and the `locker-gen` binary. They
//! run against local files and a loopback HTTP listener, never the live catalog.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: The binary through `assert_cmd`
//! - **determinism**: Byte-identical output for identical inputs
//! - **http_source**: Catalog retrieval over HTTP and failure handling
//! - **pipeline**: Merge semantics, skip rules and the end-to-end example

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod cli;
mod determinism;
mod pipeline;
