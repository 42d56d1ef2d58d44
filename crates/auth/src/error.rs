//! Auth Error Types
//!
//! The failure taxonomy of the authentication core. Credential and session
//! errors are ordinary values surfaced to the caller; only missing startup
//! configuration is fatal (see `application::config`).

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::application::token::TokenError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Input failed basic validation (empty password, etc.)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Registration confirm-password check failed
    #[error("Passwords do not match!")]
    PasswordMismatch,

    /// Password rejected by the strength policy; carries the reason text
    #[error("{0}")]
    WeakPassword(String),

    /// Login rejected; carries the user-facing message
    #[error("{0}")]
    InvalidCredentials(String),

    /// Registration rejected by the resource API (duplicate email,
    /// upstream validation failure)
    #[error("{0}")]
    RegistrationFailed(String),

    /// No token was presented
    #[error("Token is missing")]
    TokenMissing,

    /// Token malformed or signature mismatch
    #[error("Token is invalid")]
    TokenInvalid,

    /// Token carried an elapsed expiry
    #[error("Token has expired")]
    TokenExpired,

    /// Access policy denial
    #[error("Operation not permitted")]
    Unauthorized,

    /// Resource API unreachable or timed out
    #[error("Upstream service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Login failure message, folding in upstream detail when present.
    pub(crate) fn login_failed(detail: Option<&str>) -> Self {
        match detail {
            Some(detail) if !detail.is_empty() => {
                AuthError::InvalidCredentials(format!("Login failed: {detail}"))
            }
            _ => AuthError::InvalidCredentials("Invalid credentials!".to_string()),
        }
    }

    /// Registration failure message, folding in upstream detail when present.
    pub(crate) fn registration_failed(detail: Option<&str>) -> Self {
        match detail {
            Some(detail) if !detail.is_empty() => {
                AuthError::RegistrationFailed(format!("Registration failed: {detail}"))
            }
            _ => AuthError::RegistrationFailed("Registration failed!".to_string()),
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidInput(_)
            | AuthError::PasswordMismatch
            | AuthError::WeakPassword(_)
            | AuthError::RegistrationFailed(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials(_)
            | AuthError::TokenMissing
            | AuthError::TokenInvalid
            | AuthError::TokenExpired => ErrorKind::Unauthorized,
            AuthError::Unauthorized => ErrorKind::Forbidden,
            AuthError::UpstreamUnavailable(_) => ErrorKind::ServiceUnavailable,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError for the surrounding web layer to render.
    /// Internal detail stays out of the user-facing message.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Internal(_) => AppError::internal("Something went wrong"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::UpstreamUnavailable(reason) => {
                tracing::error!(reason = %reason, "Resource API unavailable");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials(_) => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Missing => AuthError::TokenMissing,
            TokenError::Invalid => AuthError::TokenInvalid,
            TokenError::Expired => AuthError::TokenExpired,
        }
    }
}
