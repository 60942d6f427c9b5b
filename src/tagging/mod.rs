//! Tag suggestion subsystem.
//!
//! # Data Flow
//! ```text
//! TagRequest (validated name + description)
//!     → service.rs (build prompt)
//!     → model.rs (LanguageModel seam; ollama.rs in production)
//!     → structured JSON reply
//!     → TagResponse (typed, at most 10 tags)
//! ```
//!
//! # Design Decisions
//! - Model settings are fixed at construction and never mutated
//! - No retries, no caching, no batching; one model call per request
//! - Timeouts and bad replies are distinct error kinds

pub mod model;
pub mod ollama;
pub mod service;
pub mod types;

pub use model::{LanguageModel, ModelError};
pub use ollama::OllamaClient;
pub use service::TagSuggestionService;
pub use types::{MissingFields, TagRequest, TagRequestBody, TagResponse, MAX_TAGS};
