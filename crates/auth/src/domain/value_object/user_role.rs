use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Parse a role code from a remote payload.
    ///
    /// Unknown codes degrade to `User` rather than failing: role strings
    /// arrive from upstream and must never crash a request.
    pub fn from_code(code: &str) -> Self {
        match code {
            "user" => UserRole::User,
            "admin" => UserRole::Admin,
            other => {
                tracing::warn!(code = %other, "Unknown user role, defaulting to user");
                UserRole::User
            }
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_code() {
        assert_eq!(UserRole::from_code("user"), UserRole::User);
        assert_eq!(UserRole::from_code("admin"), UserRole::Admin);
    }

    #[test]
    fn test_unknown_code_defaults_to_user() {
        assert_eq!(UserRole::from_code("superuser"), UserRole::User);
        assert_eq!(UserRole::from_code(""), UserRole::User);
    }

    #[test]
    fn test_user_role_display() {
        assert_eq!(UserRole::User.to_string(), "user");
        assert_eq!(UserRole::Admin.to_string(), "admin");
    }

    #[test]
    fn test_user_role_checks() {
        assert!(!UserRole::User.is_admin());
        assert!(UserRole::Admin.is_admin());
        assert_eq!(UserRole::default(), UserRole::User);
    }
}
