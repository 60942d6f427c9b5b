//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env (optional) + config file (TOML, optional)
//!     → loader.rs (parse & deserialize, environment overlay)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → handed to the auth gate and the tag suggestion service at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AuthConfig, CorsConfig, HttpConfig, ListenerConfig, LogFormat, ModelConfig,
    ObservabilityConfig, ServiceConfig, DEFAULT_SYSTEM_PROMPT,
};
pub use validation::ValidationError;
