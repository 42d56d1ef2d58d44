//! Identity Token Issuer/Validator
//!
//! Signed HS256 tokens over `{user_id, username}`. Lifetime is governed by
//! the server-side session TTL, so `issue` sets no expiry claim of its
//! own; a token that does carry an elapsed `exp` still fails validation.

use chrono::{DateTime, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind as JwtErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Claims carried by the identity token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub user_id: i64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

/// Validation failures, from the caller's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token is missing")]
    Missing,
    #[error("Token is invalid")]
    Invalid,
    #[error("Token has expired")]
    Expired,
}

/// Strip an optional `Bearer ` prefix and surrounding whitespace.
///
/// Returns `None` when nothing usable remains.
pub fn normalize(token: Option<&str>) -> Option<&str> {
    let token = token?.trim();
    let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();
    if token.is_empty() { None } else { Some(token) }
}

/// Mints and validates identity tokens with a process-wide secret.
///
/// Constructed once at startup and shared; the secret is the same one the
/// resource API signs with.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // exp is optional (the session TTL governs lifetime) but still
        // enforced when a token carries one.
        validation.set_required_spec_claims::<&str>(&[]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Mint a signed token over `{user_id, username}`, without an expiry
    /// claim.
    pub fn issue(&self, user_id: UserId, username: &str) -> AuthResult<String> {
        self.encode(TokenClaims {
            user_id: user_id.value(),
            username: username.to_string(),
            exp: None,
        })
    }

    /// Mint a token with a scheme-native expiry.
    pub fn issue_with_expiry(
        &self,
        user_id: UserId,
        username: &str,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<String> {
        self.encode(TokenClaims {
            user_id: user_id.value(),
            username: username.to_string(),
            exp: Some(expires_at.timestamp().max(0) as u64),
        })
    }

    fn encode(&self, claims: TokenClaims) -> AuthResult<String> {
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(format!("token encoding failed: {e}")))
    }

    /// Validate and decode a presented token.
    ///
    /// Accepts a raw token or one with a `Bearer ` prefix. Never panics;
    /// every malformed input maps to a [`TokenError`].
    pub fn validate(&self, token: Option<&str>) -> Result<TokenClaims, TokenError> {
        let raw = normalize(token).ok_or(TokenError::Missing)?;

        decode::<TokenClaims>(raw, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}
