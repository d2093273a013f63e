//! HTTP catalog source.

use super::{CatalogSnapshot, CatalogSource, parse_envelope};
use crate::constants::USER_AGENT;
use crate::core::LockerError;
use tracing::debug;

/// Fetches the catalog with a single `GET` against a provider endpoint.
///
/// No authentication is sent and no timeout is set beyond what the transport
/// applies.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpCatalogSource {
    /// Creates a source for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`LockerError::Other`] if the HTTP client cannot be initialized
    /// (for example when no TLS backend is available).
    pub fn new(endpoint: impl Into<String>) -> Result<Self, LockerError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build().map_err(|e| {
            LockerError::Other {
                message: format!("Failed to initialize HTTP client: {e}"),
            }
        })?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    /// The configured endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn unavailable(&self, reason: impl Into<String>) -> LockerError {
        LockerError::SourceUnavailable {
            origin: self.endpoint.clone(),
            reason: reason.into(),
        }
    }
}

impl CatalogSource for HttpCatalogSource {
    fn origin(&self) -> String {
        self.endpoint.clone()
    }

    async fn fetch(&self) -> Result<CatalogSnapshot, LockerError> {
        debug!(endpoint = %self.endpoint, "Fetching catalog");

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| self.unavailable(describe(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.unavailable(format!("HTTP {status}")));
        }

        let body = response.text().await.map_err(|e| self.unavailable(describe(&e)))?;
        debug!(endpoint = %self.endpoint, bytes = body.len(), "Received catalog response");

        parse_envelope(&self.endpoint, &body)
    }
}

/// Renders an error with its source chain; reqwest's own message omits the cause.
fn describe(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
