//! Signed bearer token verification.
//!
//! Tokens are HS256 JWTs issued elsewhere with a shared secret. Only the
//! signature and the `exp` claim are checked; everything else in the payload
//! is carried through untouched as [`Claims`].

use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AuthConfig;

/// The only accepted signing algorithm.
pub const ALGORITHM: Algorithm = Algorithm::HS256;

/// Authentication failures. Every variant ends the request with a 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No `Authorization: Bearer <token>` header, or an empty token.
    #[error("Authorization header missing or invalid")]
    AuthorizationMissing,

    /// Bad structure, bad signature or wrong algorithm.
    #[error("Invalid token")]
    InvalidToken,

    /// The `exp` claim is in the past.
    #[error("Token has expired")]
    ExpiredToken,
}

impl AuthError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::AuthorizationMissing => "authorization_missing",
            AuthError::InvalidToken => "invalid_token",
            AuthError::ExpiredToken => "expired_token",
        }
    }
}

/// Decoded token payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,

    /// Issuer-defined claims.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Verifies bearer tokens against the process-wide secret.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = config.leeway_secs;
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();
        if config.require_exp {
            validation.set_required_spec_claims(&["exp"]);
        }

        Self {
            key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    /// Check signature, algorithm and expiry, returning the decoded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        match jsonwebtoken::decode::<Claims>(token, &self.key, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(AuthError::ExpiredToken),
                _ => {
                    tracing::debug!(error = %e, "Token rejected");
                    Err(AuthError::InvalidToken)
                }
            },
        }
    }
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithm", &ALGORITHM)
            .field("leeway", &self.validation.leeway)
            .finish_non_exhaustive()
    }
}

/// Sign claims with `secret`. Used by the CLI to mint development tokens.
pub fn sign_token(secret: &str, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
    jsonwebtoken::encode(
        &Header::new(ALGORITHM),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::get_current_timestamp;

    const SECRET: &str = "test-secret";

    fn verifier() -> TokenVerifier {
        TokenVerifier::new(&AuthConfig {
            secret: SECRET.into(),
            ..Default::default()
        })
    }

    fn claims_expiring_at(exp: u64) -> Claims {
        Claims {
            sub: Some("user-1".into()),
            exp: Some(exp),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_valid_token_and_keeps_extra_claims() {
        let mut claims = claims_expiring_at(get_current_timestamp() + 600);
        claims.extra.insert("role".into(), serde_json::json!("admin"));
        let token = sign_token(SECRET, &claims).unwrap();

        let decoded = verifier().verify(&token).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn expired_token_is_distinguished() {
        let token = sign_token(SECRET, &claims_expiring_at(get_current_timestamp() - 120)).unwrap();
        assert_eq!(verifier().verify(&token), Err(AuthError::ExpiredToken));
    }

    #[test]
    fn leeway_tolerates_small_skew() {
        let token = sign_token(SECRET, &claims_expiring_at(get_current_timestamp() - 5)).unwrap();
        let lenient = TokenVerifier::new(&AuthConfig {
            secret: SECRET.into(),
            leeway_secs: 60,
            require_exp: false,
        });
        assert!(lenient.verify(&token).is_ok());
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let token = sign_token("other-secret", &claims_expiring_at(get_current_timestamp() + 600)).unwrap();
        assert_eq!(verifier().verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn wrong_algorithm_is_invalid() {
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS384),
            &claims_expiring_at(get_current_timestamp() + 600),
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert_eq!(verifier().verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn garbage_is_invalid() {
        assert_eq!(verifier().verify("not.a.jwt"), Err(AuthError::InvalidToken));
        assert_eq!(verifier().verify(""), Err(AuthError::InvalidToken));
    }

    #[test]
    fn exp_is_optional_unless_required() {
        let token = sign_token(SECRET, &Claims::default()).unwrap();
        assert!(verifier().verify(&token).is_ok());

        let strict = TokenVerifier::new(&AuthConfig {
            secret: SECRET.into(),
            leeway_secs: 0,
            require_exp: true,
        });
        assert_eq!(strict.verify(&token), Err(AuthError::InvalidToken));
    }
}
