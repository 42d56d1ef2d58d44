//! User Entity
//!
//! Verified identity of a caller. A `User` without an id is the anonymous
//! sentinel: every failed resolution collapses to it instead of erroring.

use serde::Serialize;

use crate::domain::value_object::{user_id::UserId, user_role::UserRole};

/// User entity
///
/// Created by the persistence side on registration and read-only to this
/// core afterwards; role changes are an administrative concern elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    /// Present only once persisted; `None` marks the anonymous sentinel
    pub id: Option<UserId>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: UserRole,
    pub phone: Option<String>,
    /// Opaque timestamp text as emitted by the resource API
    pub join_date: Option<String>,
}

impl User {
    /// The unauthenticated caller.
    pub fn anonymous() -> Self {
        Self {
            id: None,
            username: None,
            email: None,
            role: UserRole::default(),
            phone: None,
            join_date: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.id.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl Default for User {
    fn default() -> Self {
        Self::anonymous()
    }
}
