//! Error handling for locker-gen
//!
//! This module provides the error taxonomy of the synthesis pipeline and the
//! user-facing rendering of those errors. The split follows two rules:
//! 1. **Boundary problems are errors.** Fetching the catalog, loading the template and
//!    persisting the profile can fail, and each failure aborts the run before anything
//!    is written.
//! 2. **Item problems are not.** A malformed catalog entry becomes a skip decision in
//!    [`crate::transform`] and never surfaces here.
//!
//! # Architecture
//!
//! - [`LockerError`] - Enumerated error types for every fatal failure of a run
//! - [`ErrorContext`] - Wrapper that adds user-friendly details and suggestions
//!
//! Use [`user_friendly_error`] to convert any [`anyhow::Error`] into an [`ErrorContext`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use locker_gen::core::{LockerError, user_friendly_error};
//!
//! let error = LockerError::SourceUnavailable {
//!     origin: "https://example.invalid/v2/cosmetics".to_string(),
//!     reason: "connection refused".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for locker-gen operations
///
/// # Error Categories
///
/// ## Catalog
/// - [`SourceUnavailable`] - Transport failure, non-2xx response or unreadable file
/// - [`MalformedEnvelope`] - Response received but the `data` object is missing or invalid
///
/// ## Template and output
/// - [`TemplateNotFound`] - Template document does not exist
/// - [`InvalidTemplate`] - Template is not a JSON object with an `items` object
/// - [`WriteFailure`] - Destination is not writable
///
/// ## Configuration
/// - [`ConfigError`] - Configuration file is unusable
///
/// [`SourceUnavailable`]: LockerError::SourceUnavailable
/// [`MalformedEnvelope`]: LockerError::MalformedEnvelope
/// [`TemplateNotFound`]: LockerError::TemplateNotFound
/// [`InvalidTemplate`]: LockerError::InvalidTemplate
/// [`WriteFailure`]: LockerError::WriteFailure
/// [`ConfigError`]: LockerError::ConfigError
#[derive(Error, Debug)]
pub enum LockerError {
    /// The catalog provider could not be reached or answered with a failure status.
    #[error("Catalog source unavailable: {origin}: {reason}")]
    SourceUnavailable {
        /// Endpoint URL or file path the catalog was requested from
        origin: String,
        /// Underlying transport or status failure
        reason: String,
    },

    /// The catalog response did not carry the expected `data` object.
    #[error("Malformed catalog envelope from {origin}: {reason}")]
    MalformedEnvelope {
        /// Endpoint URL or file path the catalog was requested from
        origin: String,
        /// What was wrong with the envelope
        reason: String,
    },

    /// Template document is missing.
    #[error("Profile template not found: {path}")]
    TemplateNotFound {
        /// Path that was looked up
        path: String,
    },

    /// Template document exists but cannot be used as an accumulator.
    #[error("Invalid profile template {path}: {reason}")]
    InvalidTemplate {
        /// Path of the template
        path: String,
        /// Why the template was rejected
        reason: String,
    },

    /// The synthesized profile could not be persisted.
    #[error("Failed to write profile to {path}: {reason}")]
    WriteFailure {
        /// Destination path
        path: String,
        /// Underlying I/O failure
        reason: String,
    },

    /// Configuration file problems.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Anything else
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl Clone for LockerError {
    fn clone(&self) -> Self {
        match self {
            Self::SourceUnavailable {
                origin,
                reason,
            } => Self::SourceUnavailable {
                origin: origin.clone(),
                reason: reason.clone(),
            },
            Self::MalformedEnvelope {
                origin,
                reason,
            } => Self::MalformedEnvelope {
                origin: origin.clone(),
                reason: reason.clone(),
            },
            Self::TemplateNotFound {
                path,
            } => Self::TemplateNotFound {
                path: path.clone(),
            },
            Self::InvalidTemplate {
                path,
                reason,
            } => Self::InvalidTemplate {
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::WriteFailure {
                path,
                reason,
            } => Self::WriteFailure {
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            // serde_json::Error is not Clone; keep its rendered message
            Self::JsonError(e) => Self::Other {
                message: format!("JSON error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

impl LockerError {
    /// Whether the error happened before anything was written to the destination.
    ///
    /// Every variant except [`LockerError::WriteFailure`] aborts the run ahead of the
    /// persist step, leaving a previously written profile untouched.
    #[must_use]
    pub const fn aborts_before_write(&self) -> bool {
        !matches!(self, Self::WriteFailure { .. })
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// Wraps a [`LockerError`] with optional details (why it happened) and a
/// suggestion (what to do about it).
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: LockerError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: LockerError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`LockerError`] anywhere in the error chain, then plain
/// [`std::io::Error`]s, and otherwise falls back to the full rendered chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(locker_error) = error.chain().find_map(|e| e.downcast_ref::<LockerError>()) {
        return create_error_context(locker_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::PermissionDenied {
            return ErrorContext::new(LockerError::Other {
                message: error.to_string(),
            })
            .with_suggestion("Check file ownership and permissions of the paths involved");
        }
    }

    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(LockerError::Other {
        message,
    })
}

fn create_error_context(error: LockerError) -> ErrorContext {
    match &error {
        LockerError::SourceUnavailable {
            ..
        } => ErrorContext::new(error).with_suggestion(
                "Check your network connection and the configured endpoint, or pass --catalog-file to use a local snapshot",
            ),
        LockerError::MalformedEnvelope {
            ..
        } => ErrorContext::new(error)
            .with_details("The catalog must be a JSON object with a top-level `data` object")
            .with_suggestion("Verify the endpoint points at the cosmetics catalog API"),
        LockerError::TemplateNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Create the template file or pass --template with its location"),
        LockerError::InvalidTemplate {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "The template must be a JSON object containing an `items` object (it may be empty)",
        ),
        LockerError::WriteFailure {
            ..
        } => ErrorContext::new(error)
            .with_details("The previous profile, if any, was left in place")
            .with_suggestion("Check that the output directory exists and is writable"),
        LockerError::ConfigError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Fix the configuration file or run `locker-gen config init --force`"),
        _ => ErrorContext::new(error),
    }
}
