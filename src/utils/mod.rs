//! Utilities shared by the pipeline stages
//!
//! # Modules
//!
//! - [`fs`] - Write-then-rename persistence of generated documents
//! - [`lock`] - Single-flight lock keyed by destination path
//! - [`size`] - Human-readable file size formatting

pub mod fs;
pub mod lock;
pub mod size;

pub use fs::write_replacing;
pub use lock::OutputLock;
pub use size::format_size;
