//! Product tag suggestion service.
//!
//! Exposes `POST /suggest-tags`, which asks a locally hosted language model
//! (Ollama) for up to ten descriptive tags for a product, behind an HS256
//! bearer token gate, plus an unauthenticated `GET /healthcheck`.

pub mod auth;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod tagging;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
