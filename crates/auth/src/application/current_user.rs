//! Current User Resolution
//!
//! Turns a presented token into a verified identity. Resolution never
//! fails outward: any error on the way - missing token, bad signature,
//! dead session, upstream trouble - yields the anonymous user.

use std::sync::Arc;

use crate::application::config::{AuthConfig, ResolverStrategy};
use crate::application::token::{self, TokenIssuer};
use crate::domain::entity::user::User;
use crate::domain::gateway::ResourceApi;
use crate::domain::policy;
use crate::domain::repository::SessionRepository;
use crate::error::{AuthError, AuthResult};

/// Current user use case
pub struct CurrentUserUseCase<G, S>
where
    G: ResourceApi,
    S: SessionRepository,
{
    gateway: Arc<G>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
    tokens: Arc<TokenIssuer>,
}

impl<G, S> CurrentUserUseCase<G, S>
where
    G: ResourceApi,
    S: SessionRepository,
{
    pub fn new(
        gateway: Arc<G>,
        session_repo: Arc<S>,
        config: Arc<AuthConfig>,
        tokens: Arc<TokenIssuer>,
    ) -> Self {
        Self {
            gateway,
            session_repo,
            config,
            tokens,
        }
    }

    /// Resolve the caller behind the token, or the anonymous user.
    pub async fn execute(&self, token: Option<&str>) -> User {
        match self.resolve(token).await {
            Ok(user) => user,
            Err(e) => {
                tracing::debug!(error = %e, "Identity resolution failed, treating caller as anonymous");
                User::anonymous()
            }
        }
    }

    /// Admin gate over the resolved identity.
    pub async fn verify_admin_access(&self, token: Option<&str>) -> bool {
        let user = self.execute(token).await;
        policy::require_admin(&user)
    }

    async fn resolve(&self, token: Option<&str>) -> AuthResult<User> {
        // Signature and scheme-native expiry first; a token that does not
        // check out locally never reaches the session store.
        let claims = self.tokens.validate(token)?;
        let bare = token::normalize(token).ok_or(AuthError::TokenMissing)?;

        let session = self
            .session_repo
            .find_by_token(bare)
            .await?
            .ok_or(AuthError::TokenInvalid)?;

        if session.is_expired() {
            // Expired sessions are destroyed on sight.
            self.session_repo.delete(bare).await?;
            return Err(AuthError::TokenExpired);
        }

        // The token must speak for the session it is keyed under.
        if claims.user_id != session.user_id.value() {
            return Err(AuthError::TokenInvalid);
        }

        match self.config.resolver {
            ResolverStrategy::SessionTrusting => Ok(session.to_user()),
            ResolverStrategy::RemoteVerified => {
                let check = self
                    .gateway
                    .check_session(bare)
                    .await
                    .map_err(|e| AuthError::UpstreamUnavailable(e.to_string()))?;

                match (check.valid, check.user) {
                    (true, Some(api_user)) => Ok(User::from(api_user)),
                    _ => Err(AuthError::TokenInvalid),
                }
            }
        }
    }
}
