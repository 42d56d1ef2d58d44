//! Session Entity
//!
//! Per-caller server-side state, keyed by the bearer token. Established on
//! successful login or registration, destroyed on logout or expiry, and
//! replaced wholesale on re-login - never mutated in place.

use chrono::{DateTime, Duration, Utc};

use crate::domain::entity::user::User;
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Session entity
#[derive(Debug, Clone)]
pub struct Session {
    /// Signed token presented by the caller; also the store key
    pub token: String,
    pub user_id: UserId,
    pub username: String,
    pub email: Option<String>,
    /// Role at session creation
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
}

impl Session {
    /// Establish a session for an authenticated user.
    ///
    /// All identity fields are snapshotted atomically; an anonymous or
    /// incomplete user refuses to establish so a session can never be
    /// partially populated.
    pub fn establish(user: &User, token: impl Into<String>, ttl: Duration) -> AuthResult<Self> {
        let user_id = user
            .id
            .ok_or_else(|| AuthError::Internal("cannot establish session for anonymous user".to_string()))?;
        let username = user
            .username
            .clone()
            .ok_or_else(|| AuthError::Internal("user payload missing username".to_string()))?;

        let now = Utc::now();

        Ok(Self {
            token: token.into(),
            user_id,
            username,
            email: user.email.clone(),
            role: user.role,
            created_at: now,
            expires_at_ms: (now + ttl).timestamp_millis(),
        })
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Get remaining time until expiration
    pub fn remaining_ms(&self) -> i64 {
        let now_ms = Utc::now().timestamp_millis();
        (self.expires_at_ms - now_ms).max(0)
    }

    /// Synthesize a `User` from the identity snapshot (session-trusting
    /// resolution).
    pub fn to_user(&self) -> User {
        User {
            id: Some(self.user_id),
            username: Some(self.username.clone()),
            email: self.email.clone(),
            role: self.role,
            phone: None,
            join_date: None,
        }
    }
}
