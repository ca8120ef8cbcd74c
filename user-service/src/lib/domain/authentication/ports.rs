use async_trait::async_trait;
use auth::TokenPair;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::Credentials;

/// Port for the login and token refresh flows.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue a token pair.
    ///
    /// # Arguments
    /// * `credentials` - Username and plaintext password
    /// * `now` - Reference Unix timestamp (seconds)
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this username
    /// * `InvalidCredentials` - Password does not match
    /// * `InvalidDigestFormat` - Stored digest is malformed
    async fn login(&self, credentials: Credentials, now: i64) -> Result<TokenPair, AuthError>;

    /// Exchange a valid refresh token for a fresh token pair.
    ///
    /// The user is looked up again so deleted accounts are rejected and role
    /// changes are reflected in the new tokens.
    ///
    /// # Errors
    /// * `Token` - Refresh token is invalid or expired
    /// * `UserNotFound` - User no longer exists
    async fn approve(&self, refresh_token: &str, now: i64) -> Result<TokenPair, AuthError>;
}
