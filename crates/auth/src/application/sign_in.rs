//! Sign In Use Case
//!
//! Authenticates a caller against the resource API and establishes a
//! server-side session around the upstream-minted token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::{session::Session, user::User};
use crate::domain::gateway::{GatewayError, ResourceApi};
use crate::domain::repository::SessionRepository;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    /// Email or username
    pub identifier: String,
    /// Password, passed through verbatim
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub user: User,
    pub session: Session,
}

/// Sign in use case
pub struct SignInUseCase<G, S>
where
    G: ResourceApi,
    S: SessionRepository,
{
    gateway: Arc<G>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<G, S> SignInUseCase<G, S>
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

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        // The identifier is untrusted; the password must reach the
        // verifier unmodified.
        let identifier = platform::sanitize::sanitize(&input.identifier);
        let password = input.password;

        if identifier.is_empty() || password.is_empty() {
            return Err(AuthError::login_failed(None));
        }

        let payload = match self.gateway.login(&identifier, &password).await {
            Ok(payload) => payload,
            Err(GatewayError::Rejected { message, .. }) => {
                return Err(AuthError::login_failed(Some(&message)));
            }
            Err(GatewayError::Unavailable(reason)) => {
                return Err(AuthError::UpstreamUnavailable(reason));
            }
        };

        let user = User::from(payload.user);

        // The token was minted by the resource API's signer; it is not
        // re-signed here.
        let session = Session::establish(&user, payload.token, self.config.session_ttl_chrono())?;
        self.session_repo.create(&session).await?;

        tracing::info!(user_id = %session.user_id, role = %session.role, "User signed in");

        Ok(SignInOutput { user, session })
    }
}
