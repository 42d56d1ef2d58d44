//! Application Configuration
//!
//! Process-wide configuration, read once at startup and immutable
//! afterwards. A missing signing secret is the one fatal startup error in
//! this core.

use std::env;
use std::time::Duration;

use kernel::error::app_error::{AppError, AppResult};

/// Default server-side session lifetime in seconds
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

/// How a presented token is resolved to an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolverStrategy {
    /// Re-validate the session against the resource API on every
    /// resolution. Slower, but revocation takes effect immediately.
    #[default]
    RemoteVerified,
    /// Trust the identity snapshot in the server-side session without a
    /// round trip. No upstream revocation - the weaker trust model.
    SessionTrusting,
}

impl ResolverStrategy {
    pub const fn code(&self) -> &'static str {
        match self {
            ResolverStrategy::RemoteVerified => "remote",
            ResolverStrategy::SessionTrusting => "session",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "remote" => Some(ResolverStrategy::RemoteVerified),
            "session" => Some(ResolverStrategy::SessionTrusting),
            _ => None,
        }
    }
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Signing secret shared with the resource API's token minter
    pub token_secret: Vec<u8>,
    /// Base URL of the resource API
    pub resource_api_url: String,
    /// Server-side session lifetime
    pub session_ttl: Duration,
    /// Identity resolution strategy
    pub resolver: ResolverStrategy,
}

impl AuthConfig {
    pub fn new(token_secret: impl Into<Vec<u8>>, resource_api_url: impl Into<String>) -> Self {
        Self {
            token_secret: token_secret.into(),
            resource_api_url: resource_api_url.into(),
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            resolver: ResolverStrategy::default(),
        }
    }

    /// Config with a random signing secret (development / tests)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self::new(secret.to_vec(), "http://localhost:8000")
    }

    /// Load configuration from the environment.
    ///
    /// `SECRET_KEY` is required - a deployment must never run on a
    /// baked-in default secret. `DATABASE_API_URL` defaults to the local
    /// resource API, `SESSION_LIFETIME_SECS` to one hour, and
    /// `AUTH_RESOLVER` (`remote` | `session`) to remote verification.
    pub fn from_env() -> AppResult<Self> {
        let secret = env::var("SECRET_KEY")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                AppError::internal("SECRET_KEY must be set")
                    .with_action("Export SECRET_KEY before starting the service")
            })?;

        let resource_api_url = env::var("DATABASE_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());

        let session_ttl_secs = env::var("SESSION_LIFETIME_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SESSION_TTL_SECS);

        let resolver = env::var("AUTH_RESOLVER")
            .ok()
            .and_then(|v| ResolverStrategy::from_code(&v))
            .unwrap_or_default();

        Ok(Self {
            token_secret: secret.into_bytes(),
            resource_api_url,
            session_ttl: Duration::from_secs(session_ttl_secs),
            resolver,
        })
    }

    pub fn session_ttl_secs(&self) -> u64 {
        self.session_ttl.as_secs()
    }

    /// Session TTL as a chrono duration for expiry arithmetic.
    pub fn session_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.session_ttl)
            .unwrap_or_else(|_| chrono::Duration::seconds(DEFAULT_SESSION_TTL_SECS as i64))
    }
}
