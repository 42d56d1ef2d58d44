//! Repository Traits
//!
//! Interfaces for session persistence. Implementation is in the
//! infrastructure layer.

use crate::domain::entity::session::Session;
use crate::error::AuthResult;

/// Server-side session store, keyed by token
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Store a new session
    async fn create(&self, session: &Session) -> AuthResult<()>;

    /// Find a session by its token
    async fn find_by_token(&self, token: &str) -> AuthResult<Option<Session>>;

    /// Delete a session; deleting an absent token is not an error
    async fn delete(&self, token: &str) -> AuthResult<()>;

    /// Remove expired sessions, returning how many were dropped
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
