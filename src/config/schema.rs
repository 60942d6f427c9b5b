//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Default instruction given to the language model with every request.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You should give tags for a product. \
The tags should be in the same language as product name and description. \
You should limit tags to 10. Format should be a list of strings";

/// Root configuration for the tag suggestion service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Bearer token verification settings.
    pub auth: AuthConfig,

    /// Language model runtime settings.
    pub model: ModelConfig,

    /// Transport-level limits and compatibility switches.
    pub http: HttpConfig,

    /// Cross-origin policy.
    pub cors: CorsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Token verification configuration.
///
/// Tokens are always HS256; only the shared secret and expiry handling are tunable.
#[derive(Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared secret used to verify token signatures.
    pub secret: String,

    /// Clock skew tolerated when checking `exp`, in seconds.
    pub leeway_secs: u64,

    /// Reject tokens that carry no `exp` claim.
    pub require_exp: bool,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"[REDACTED]")
            .field("leeway_secs", &self.leeway_secs)
            .field("require_exp", &self.require_exp)
            .finish()
    }
}

/// Language model runtime configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Base URL of the Ollama runtime.
    pub base_url: String,

    /// Model identifier (e.g., "mistral:7b").
    pub model: String,

    /// Maximum time to wait for a reply, in seconds.
    pub request_timeout_secs: u64,

    /// Context window (tokens) the model will consider.
    pub context_window: u32,

    /// Instruction sent as the system message on every call.
    pub system_prompt: String,

    /// Sampling temperature. Runtime default when unset.
    pub temperature: Option<f32>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "mistral:7b".to_string(),
            request_timeout_secs: 100,
            context_window: 8000,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            temperature: None,
        }
    }
}

/// HTTP transport configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Maximum request body size in bytes.
    pub max_body_size: usize,

    /// Answer validation failures with 200 instead of 400, for older clients.
    pub legacy_validation_status: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
            legacy_validation_status: false,
        }
    }
}

/// Cross-origin resource sharing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins. Empty, or any entry equal to `*`, means any origin
    /// (mirrored back to the caller).
    pub allowed_origins: Vec<String>,

    /// Send `Access-Control-Allow-Credentials: true`.
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            allow_credentials: true,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8000");
        assert_eq!(config.model.model, "mistral:7b");
        assert_eq!(config.model.request_timeout_secs, 100);
        assert_eq!(config.model.context_window, 8000);
        assert!(config.auth.secret.is_empty());
        assert!(config.cors.allow_credentials);
        assert!(!config.http.legacy_validation_status);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [model]
            model = "llama3.2:3b"
            temperature = 0.2

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.model.model, "llama3.2:3b");
        assert_eq!(config.model.temperature, Some(0.2));
        assert_eq!(config.model.base_url, "http://localhost:11434");
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn debug_output_redacts_secret() {
        let auth = AuthConfig {
            secret: "hunter2".into(),
            ..Default::default()
        };
        let rendered = format!("{:?}", auth);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("REDACTED"));
    }
}
