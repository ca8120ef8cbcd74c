use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::ClaimsBase;
use auth::TokenPair;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::Credentials;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::ports::UserRepository;

/// Login and refresh orchestration over the user store and the authenticator.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn lookup(&self, username: &str) -> Result<User, AuthError> {
        // A name that fails validation cannot belong to a stored user
        let username = Username::new(username.to_string())
            .map_err(|_| AuthError::UserNotFound(username.to_string()))?;

        self.repository
            .find_by_username(&username)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(username.to_string()))
    }

    /// Replace a digest produced by a retired scheme. Failures are logged only.
    ///
    /// Only the digest is written, so concurrent changes to the account survive.
    async fn rehash(&self, id: &UserId, password: String) {
        let authenticator = Arc::clone(&self.authenticator);
        let hashed = tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await;

        match hashed {
            Ok(Ok(password_hash)) => {
                match self.repository.update_password_hash(id, password_hash).await {
                    Ok(()) => tracing::info!(user_id = %id, "Password digest upgraded"),
                    Err(e) => tracing::warn!(
                        user_id = %id,
                        error = %e,
                        "Failed to store upgraded password digest"
                    ),
                }
            }
            Ok(Err(e)) => tracing::warn!(error = %e, "Failed to rehash password"),
            Err(e) => tracing::warn!(error = %e, "Password rehash task failed"),
        }
    }
}

fn claims_base(user: &User) -> ClaimsBase {
    ClaimsBase::new(user.username.as_str(), user.role.as_str())
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn login(&self, credentials: Credentials, now: i64) -> Result<TokenPair, AuthError> {
        let Credentials { username, password } = credentials;
        let user = self.lookup(&username).await?;

        let authenticator = Arc::clone(&self.authenticator);
        let digest = user.password_hash.clone();
        let base = claims_base(&user);
        let (tokens, password) = tokio::task::spawn_blocking(move || {
            authenticator
                .authenticate(&password, &digest, &base, now)
                .map(|tokens| (tokens, password))
        })
        .await
        .map_err(|e| AuthError::Unknown(format!("Password verification task failed: {}", e)))?
        .map_err(|e| {
            tracing::info!(username = %user.username, error = %e, "Login rejected");
            AuthError::from(e)
        })?;

        if self.authenticator.needs_rehash(&user.password_hash) {
            self.rehash(&user.id, password).await;
        }

        tracing::info!(user_id = %user.id, username = %user.username, "User logged in");
        Ok(tokens)
    }

    async fn approve(&self, refresh_token: &str, now: i64) -> Result<TokenPair, AuthError> {
        let claims = self
            .authenticator
            .validate_refresh_token(refresh_token, now)?;
        let user = self.lookup(&claims.username).await?;

        let tokens = self.authenticator.issue_tokens(&claims_base(&user), now)?;
        tracing::info!(user_id = %user.id, username = %user.username, "Tokens refreshed");

        Ok(tokens)
    }
}
