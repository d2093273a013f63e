//! Core types and functionality for locker-gen
//!
//! This module holds the error taxonomy shared by every stage of the synthesis
//! pipeline.
//!
//! # Modules
//!
//! ## `error` - Error Handling
//!
//! - [`LockerError`] - Enumerated error types covering every fatal failure of a run
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format
//!
//! # Examples
//!
//! ```rust
//! use locker_gen::core::{LockerError, user_friendly_error};
//! use anyhow::Result;
//!
//! fn load() -> Result<String> {
//!     Err(LockerError::TemplateNotFound {
//!         path: "profiles/athena_template.json".to_string(),
//!     }
//!     .into())
//! }
//!
//! if let Err(e) = load() {
//!     let friendly = user_friendly_error(e);
//!     assert!(friendly.suggestion.is_some());
//! }
//! ```

pub mod error;

pub use error::{ErrorContext, LockerError, user_friendly_error};
