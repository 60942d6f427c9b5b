//! Bearer token gate for protected routes.
//!
//! The gate runs before the handler and before the body is read. On success
//! the decoded [`Claims`] are attached to the request extensions; on any
//! failure the request ends with a 401 and the handler never runs.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::token::{AuthError, Claims, TokenVerifier};
use crate::http::error::ApiError;
use crate::observability::metrics;

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively. A missing header, another
/// scheme or an empty token are all [`AuthError::AuthorizationMissing`].
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::AuthorizationMissing)?;

    let (scheme, rest) = value
        .split_once(' ')
        .ok_or(AuthError::AuthorizationMissing)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::AuthorizationMissing);
    }

    rest.split_whitespace()
        .next()
        .ok_or(AuthError::AuthorizationMissing)
}

/// Middleware rejecting requests without a valid bearer token.
pub async fn require_bearer(
    State(verifier): State<Arc<TokenVerifier>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let outcome = bearer_token(request.headers()).and_then(|token| verifier.verify(token));

    match outcome {
        Ok(claims) => {
            tracing::debug!(subject = ?claims.sub, "Bearer token accepted");
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(e) => {
            tracing::warn!(
                kind = e.kind(),
                path = %request.uri().path(),
                "Authentication failed"
            );
            metrics::record_auth_failure(e.kind());
            Err(ApiError::Auth(e))
        }
    }
}

/// Handlers take `Claims` as an argument to read what the gate decoded.
impl<S: Send + Sync> FromRequestParts<S> for Claims {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or(ApiError::Auth(AuthError::AuthorizationMissing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_token_after_scheme() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(bearer_token(&headers("bearer abc")), Ok("abc"));
    }

    #[test]
    fn missing_header_is_rejected() {
        assert_eq!(bearer_token(&HeaderMap::new()), Err(AuthError::AuthorizationMissing));
    }

    #[test]
    fn other_schemes_are_rejected() {
        assert_eq!(
            bearer_token(&headers("Basic dXNlcjpwYXNz")),
            Err(AuthError::AuthorizationMissing)
        );
        assert_eq!(bearer_token(&headers("Bearer")), Err(AuthError::AuthorizationMissing));
        assert_eq!(bearer_token(&headers("Token abc")), Err(AuthError::AuthorizationMissing));
    }

    #[test]
    fn empty_token_segment_is_rejected() {
        assert_eq!(bearer_token(&headers("Bearer ")), Err(AuthError::AuthorizationMissing));
        assert_eq!(bearer_token(&headers("Bearer    ")), Err(AuthError::AuthorizationMissing));
    }
}
