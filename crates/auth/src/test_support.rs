//! Test doubles shared across use-case tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use platform::password::{ClearTextPassword, StoredCredential};

use crate::application::token::TokenIssuer;
use crate::domain::gateway::{
    ApiUser, CreateUserRequest, CreatedUser, GatewayError, GatewayResult, LoginPayload,
    ResourceApi, SessionCheck,
};
use crate::domain::value_object::user_id::UserId;

/// User row as the resource API would store it
#[derive(Clone)]
struct StoredUser {
    id: i64,
    username: String,
    email: String,
    credential: StoredCredential,
    role: String,
}

impl StoredUser {
    fn to_api_user(&self) -> ApiUser {
        ApiUser {
            id: self.id,
            username: self.username.clone(),
            email: Some(self.email.clone()),
            role: Some(self.role.clone()),
            phone: None,
            join_date: None,
        }
    }
}

/// In-process stand-in for the resource API.
///
/// Verifies credentials with the real hasher, so hashed and legacy
/// plaintext rows behave exactly as they would in production.
pub struct MockResourceApi {
    users: RwLock<Vec<StoredUser>>,
    tokens: Arc<TokenIssuer>,
    login_disabled: AtomicBool,
    unavailable: AtomicBool,
    create_calls: AtomicUsize,
}

impl MockResourceApi {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            tokens: Arc::new(TokenIssuer::new(secret)),
            login_disabled: AtomicBool::new(false),
            unavailable: AtomicBool::new(false),
            create_calls: AtomicUsize::new(0),
        }
    }

    /// Seed a row with a properly hashed credential and role `user`.
    pub fn seed_hashed(&self, id: i64, username: &str, email: &str, password: &str) {
        let credential = ClearTextPassword::new(password.to_string())
            .expect("seed password")
            .hash();
        self.seed(id, username, email, credential, "user");
    }

    /// Seed a pre-hashing row storing the bare plaintext.
    pub fn seed_legacy(&self, id: i64, username: &str, email: &str, plaintext: &str, role: &str) {
        self.seed(id, username, email, StoredCredential::from_stored(plaintext), role);
    }

    fn seed(&self, id: i64, username: &str, email: &str, credential: StoredCredential, role: &str) {
        self.users.write().expect("mock lock").push(StoredUser {
            id,
            username: username.to_string(),
            email: email.to_string(),
            credential,
            role: role.to_string(),
        });
    }

    /// Make every login attempt fail from now on.
    pub fn disable_login(&self) {
        self.login_disabled.store(true, Ordering::SeqCst);
    }

    /// Simulate an unreachable resource API.
    pub fn set_unavailable(&self) {
        self.unavailable.store(true, Ordering::SeqCst);
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Stored credential text for a row, as persistence would hold it.
    pub fn stored_credential(&self, email: &str) -> Option<String> {
        self.users
            .read()
            .expect("mock lock")
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.credential.as_str().to_string())
    }

    pub fn stored_username(&self, email: &str) -> Option<String> {
        self.users
            .read()
            .expect("mock lock")
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.username.clone())
    }

    fn check_reachable(&self) -> GatewayResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(GatewayError::Unavailable("connection refused".to_string()))
        } else {
            Ok(())
        }
    }

    fn find(&self, identifier: &str) -> Option<StoredUser> {
        let users = self.users.read().expect("mock lock");
        // Email first, then username - mirrors the real endpoint
        users
            .iter()
            .find(|u| u.email == identifier)
            .or_else(|| users.iter().find(|u| u.username == identifier))
            .cloned()
    }
}

impl ResourceApi for MockResourceApi {
    async fn login(&self, identifier: &str, password: &str) -> GatewayResult<LoginPayload> {
        self.check_reachable()?;

        if self.login_disabled.load(Ordering::SeqCst) {
            return Err(GatewayError::Rejected {
                status: 401,
                message: "Invalid credentials".to_string(),
            });
        }

        let user = self.find(identifier).filter(|u| u.credential.verify(password));
        match user {
            Some(user) => {
                let token = self
                    .tokens
                    .issue(UserId::new(user.id), &user.username)
                    .expect("mock token issue");
                Ok(LoginPayload {
                    token,
                    user: user.to_api_user(),
                })
            }
            None => Err(GatewayError::Rejected {
                status: 401,
                message: "Invalid credentials".to_string(),
            }),
        }
    }

    async fn create_user(&self, request: &CreateUserRequest) -> GatewayResult<CreatedUser> {
        self.check_reachable()?;
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        let mut users = self.users.write().expect("mock lock");
        if users.iter().any(|u| u.email == request.email) {
            return Err(GatewayError::Rejected {
                status: 400,
                message: "Email already registered".to_string(),
            });
        }

        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        users.push(StoredUser {
            id,
            username: request.username.clone(),
            email: request.email.clone(),
            credential: StoredCredential::from_stored(request.password.as_str()),
            role: request.role.clone(),
        });

        Ok(CreatedUser {
            id,
            username: Some(request.username.clone()),
            email: Some(request.email.clone()),
            role: Some(request.role.clone()),
        })
    }

    async fn check_session(&self, token: &str) -> GatewayResult<SessionCheck> {
        self.check_reachable()?;

        let claims = self.tokens.validate(Some(token)).map_err(|_| {
            GatewayError::Rejected {
                status: 401,
                message: "Invalid token".to_string(),
            }
        })?;

        let users = self.users.read().expect("mock lock");
        match users.iter().find(|u| u.id == claims.user_id) {
            Some(user) => Ok(SessionCheck {
                valid: true,
                user: Some(user.to_api_user()),
            }),
            None => Err(GatewayError::Rejected {
                status: 404,
                message: "User not found".to_string(),
            }),
        }
    }
}
