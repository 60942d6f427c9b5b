//! Authentication subsystem.
//!
//! # Data Flow
//! ```text
//! Protected request:
//!     → middleware.rs (read Authorization header, require Bearer scheme)
//!     → token.rs (HS256 signature + expiry check)
//!     → Claims attached to request extensions
//!     → handler
//! ```
//!
//! # Design Decisions
//! - Each request is authenticated on its own; no sessions, no refresh
//! - Fail closed: any problem ends the request with 401
//! - The secret is read once at startup and never changes

pub mod middleware;
pub mod token;

pub use middleware::{bearer_token, require_bearer};
pub use token::{sign_token, AuthError, Claims, TokenVerifier};
