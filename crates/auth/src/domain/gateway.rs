//! Resource API Gateway
//!
//! Contract for the external persistence service that owns user rows and
//! token minting. Responses are explicit typed payloads; a non-success
//! answer is `Rejected` with the upstream status and message, a transport
//! failure is `Unavailable`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::entity::user::User;
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};

// ============================================================================
// Payloads
// ============================================================================

/// User payload as the resource API returns it
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub join_date: Option<String>,
}

impl From<ApiUser> for User {
    fn from(api: ApiUser) -> Self {
        User {
            id: Some(UserId::new(api.id)),
            username: Some(api.username),
            email: api.email,
            // Absent role defaults to a regular user
            role: api
                .role
                .as_deref()
                .map(UserRole::from_code)
                .unwrap_or_default(),
            phone: api.phone,
            join_date: api.join_date,
        }
    }
}

/// Successful login answer: the upstream-minted token plus the user row
#[derive(Debug, Clone, Deserialize)]
pub struct LoginPayload {
    pub token: String,
    pub user: ApiUser,
}

/// Registration request body
///
/// `password` is already in stored-credential form; the clear text never
/// leaves this core.
#[derive(Debug, Clone, Serialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Created-user acknowledgment (HTTP 201)
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedUser {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Check-session answer
#[derive(Debug, Clone, Deserialize)]
pub struct SessionCheck {
    pub valid: bool,
    #[serde(default)]
    pub user: Option<ApiUser>,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The resource API answered with a non-success status
    #[error("Resource API rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The resource API could not be reached (network failure, timeout)
    #[error("Resource API unavailable: {0}")]
    Unavailable(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

// ============================================================================
// Contract
// ============================================================================

/// The persistence collaborator's operations used by this core
#[trait_variant::make(ResourceApi: Send)]
pub trait LocalResourceApi {
    /// Verify credentials; a success carries a freshly minted token
    async fn login(&self, identifier: &str, password: &str) -> GatewayResult<LoginPayload>;

    /// Create a user row; uniqueness is enforced upstream
    async fn create_user(&self, request: &CreateUserRequest) -> GatewayResult<CreatedUser>;

    /// Ask whether a token still maps to a live user
    async fn check_session(&self, token: &str) -> GatewayResult<SessionCheck>;
}
