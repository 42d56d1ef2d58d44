//! In-Memory Session Store
//!
//! Process-local implementation of [`SessionRepository`]. Constructed once
//! at startup and shared; concurrent requests for different sessions are
//! independent, so a plain read-write lock over the map suffices.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entity::session::Session;
use crate::domain::repository::SessionRepository;
use crate::error::{AuthError, AuthResult};

#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    inner: Arc<RwLock<HashMap<String, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionRepository for InMemorySessionStore {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        let mut sessions = self
            .inner
            .write()
            .map_err(|_| AuthError::Internal("session store lock poisoned".to_string()))?;
        sessions.insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> AuthResult<Option<Session>> {
        let sessions = self
            .inner
            .read()
            .map_err(|_| AuthError::Internal("session store lock poisoned".to_string()))?;
        Ok(sessions.get(token).cloned())
    }

    async fn delete(&self, token: &str) -> AuthResult<()> {
        let mut sessions = self
            .inner
            .write()
            .map_err(|_| AuthError::Internal("session store lock poisoned".to_string()))?;
        sessions.remove(token);
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let mut sessions = self
            .inner
            .write()
            .map_err(|_| AuthError::Internal("session store lock poisoned".to_string()))?;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired());
        let deleted = (before - sessions.len()) as u64;

        if deleted > 0 {
            tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");
        }

        Ok(deleted)
    }
}
