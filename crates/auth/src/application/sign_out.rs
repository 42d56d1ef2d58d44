//! Sign Out Use Case
//!
//! Destroys the caller's server-side session. Idempotent: signing out with
//! no token, a malformed token, or an already-destroyed session all
//! succeed quietly.

use std::sync::Arc;

use crate::application::token;
use crate::domain::repository::SessionRepository;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    /// Destroy the session behind the presented token, if any.
    pub async fn execute(&self, token: Option<&str>) {
        let Some(token) = token::normalize(token) else {
            return;
        };

        if let Err(e) = self.session_repo.delete(token).await {
            tracing::warn!(error = %e, "Failed to delete session on sign out");
        } else {
            tracing::info!("User signed out");
        }
    }
}
