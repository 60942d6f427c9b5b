//! The language model seam.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Failures talking to the language model runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// No reply within the configured bound.
    #[error("model did not respond within {0:?}")]
    Timeout(Duration),

    /// Connection refused, non-2xx status, or similar transport failure.
    #[error("model runtime unavailable: {0}")]
    Unavailable(String),

    /// The reply did not match the requested shape.
    #[error("malformed model reply: {0}")]
    MalformedReply(String),

    /// The client could not be built from its configuration.
    #[error("invalid model client configuration: {0}")]
    Configuration(String),
}

impl ModelError {
    /// Stable label for logs and metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            ModelError::Timeout(_) => "timeout",
            ModelError::Unavailable(_) => "unavailable",
            ModelError::MalformedReply(_) => "malformed_reply",
            ModelError::Configuration(_) => "configuration",
        }
    }
}

/// A language model that answers a single prompt with output constrained
/// to a JSON schema.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send `prompt` and return the raw text of the structured reply.
    async fn complete(&self, prompt: &str, schema: &Value) -> Result<String, ModelError>;

    /// Model identifier, for logging.
    fn name(&self) -> &str;
}
