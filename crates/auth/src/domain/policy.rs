//! Access Policy
//!
//! Role gating over a resolved identity. Callers deny or redirect on a
//! `false`/`Err` - these checks never panic.

use crate::domain::entity::user::User;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// True iff the user is authenticated and holds exactly the given role.
pub fn require_role(user: &User, role: UserRole) -> bool {
    user.is_authenticated() && user.role == role
}

/// True iff the user is an authenticated admin.
pub fn require_admin(user: &User) -> bool {
    require_role(user, UserRole::Admin)
}

/// Admin gate for callers that want deny-by-error.
pub fn ensure_admin(user: &User) -> AuthResult<()> {
    if require_admin(user) {
        Ok(())
    } else {
        Err(AuthError::Unauthorized)
    }
}
