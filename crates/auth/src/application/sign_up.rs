//! Sign Up Use Case
//!
//! Creates a new user account through the resource API, then attempts an
//! automatic login with the same credentials.

use std::sync::Arc;

use platform::password::{ClearTextPassword, check_strength};
use platform::sanitize::sanitize;

use crate::application::config::AuthConfig;
use crate::application::sign_in::{SignInInput, SignInUseCase};
use crate::domain::entity::{session::Session, user::User};
use crate::domain::gateway::{CreateUserRequest, GatewayError, ResourceApi};
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Sign up output
///
/// `session` is present when the automatic post-registration login
/// succeeded. When it is `None` the account exists all the same; the
/// caller must prompt for a separate login.
#[derive(Debug)]
pub struct SignUpOutput {
    pub user: Option<User>,
    pub session: Option<Session>,
}

/// Sign up use case
pub struct SignUpUseCase<G, S>
where
    G: ResourceApi,
    S: SessionRepository,
{
    gateway: Arc<G>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<G, S> SignUpUseCase<G, S>
where
    G: ResourceApi,
    S: SessionRepository,
{
    pub fn new(gateway: Arc<G>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            gateway,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        // Local validation first; nothing reaches the resource API until
        // the credentials are acceptable.
        if input.password != input.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        check_strength(&input.password).map_err(|e| AuthError::WeakPassword(e.to_string()))?;

        let username = sanitize(&input.username);
        let email = sanitize(&input.email);

        // Hash here: the clear text never leaves this core.
        let clear = ClearTextPassword::new(input.password.clone())
            .map_err(|e| AuthError::InvalidInput(e.to_string()))?;
        let credential = clear.hash();

        let request = CreateUserRequest {
            username,
            email: email.clone(),
            password: credential.as_str().to_string(),
            role: UserRole::User.code().to_string(),
        };

        match self.gateway.create_user(&request).await {
            Ok(created) => {
                tracing::info!(user_id = created.id, "User registered");
            }
            Err(GatewayError::Rejected { message, .. }) => {
                return Err(AuthError::registration_failed(Some(&message)));
            }
            Err(GatewayError::Unavailable(reason)) => {
                return Err(AuthError::UpstreamUnavailable(reason));
            }
        }

        // Automatic login with the freshly registered credentials
        let sign_in = SignInUseCase::new(
            self.gateway.clone(),
            self.session_repo.clone(),
            self.config.clone(),
        );
        match sign_in
            .execute(SignInInput {
                identifier: email,
                password: input.password,
            })
            .await
        {
            Ok(output) => Ok(SignUpOutput {
                user: Some(output.user),
                session: Some(output.session),
            }),
            Err(e) => {
                // Registration itself succeeded; the caller prompts for a
                // manual login.
                tracing::warn!(error = %e, "Auto-login after registration failed");
                Ok(SignUpOutput {
                    user: None,
                    session: None,
                })
            }
        }
    }
}
