//! Client for the tag suggestion service.

mod client;

pub use client::{ClientError, HealthStatus, TagClient, TagRequest, TagResponse};
