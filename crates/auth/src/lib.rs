//! Auth - Session Authentication Core
//!
//! Clean Architecture structure:
//! - `domain/` - entities, value objects, access policy, store/gateway traits
//! - `application/` - use cases, configuration, token issuer
//! - `infra/` - session store and resource API client implementations
//!
//! ## Features
//! - Login and registration against a remote resource API
//! - Server-side sessions keyed by a signed bearer token, with a fixed TTL
//! - Salted SHA-256 credential verification with a legacy plaintext fallback
//! - Role-based access gating (user / admin)
//!
//! ## Security Model
//! - Passwords are hashed before they leave this core
//! - Identity resolution degrades to the anonymous user on every failure
//! - Remote-verified resolution re-checks the session upstream, so logout
//!   and revocation take effect immediately
//!
//! This crate is a library: the surrounding web layer owns route wiring
//! and moves the session token in and out of cookies or headers.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports for convenience
pub use application::config::{AuthConfig, ResolverStrategy};
pub use application::token::{TokenClaims, TokenError, TokenIssuer};
pub use error::{AuthError, AuthResult};
pub use infra::http::HttpResourceApi;
pub use infra::memory::InMemorySessionStore;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}

pub mod use_cases {
    pub use crate::application::current_user::*;
    pub use crate::application::sign_in::*;
    pub use crate::application::sign_out::*;
    pub use crate::application::sign_up::*;
}

pub mod policy {
    pub use crate::domain::policy::*;
}
