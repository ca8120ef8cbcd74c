use std::sync::Arc;

use crate::jwt::ClaimsBase;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenClaims;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenPair;
use crate::jwt::TokenVerifier;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::settings::AuthSettings;

/// Authentication coordinator combining password verification and token handling.
///
/// Built once at startup from [`AuthSettings`] and shared read-only between requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
}

/// Authentication operation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Insufficient role: {required} required")]
    InsufficientRole { required: String },

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Errors
    /// * `PasswordError` - Password settings are invalid
    /// * `JwtError` - Secret is missing, the algorithm is not supported or a
    ///   token lifetime is not positive
    pub fn new(settings: AuthSettings) -> Result<Self, AuthenticationError> {
        let password_hasher = PasswordHasher::new(&settings.password)?;
        let handler = Arc::new(JwtHandler::new(
            &settings.token.secret,
            settings.token.algorithm,
        )?);

        Ok(Self {
            password_hasher,
            issuer: TokenIssuer::new(
                Arc::clone(&handler),
                settings.token.access_ttl,
                settings.token.refresh_ttl,
            )?,
            verifier: TokenVerifier::new(handler),
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored digest.
    ///
    /// # Errors
    /// * `InvalidDigestFormat` - Stored digest is malformed
    pub fn verify_password(&self, digest: &str, password: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(digest, password)
    }

    /// Whether a stored digest should be replaced by one of the configured scheme.
    pub fn needs_rehash(&self, digest: &str) -> bool {
        self.password_hasher.needs_rehash(digest)
    }

    /// Verify credentials and issue a token pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_digest` - Stored password digest
    /// * `base` - Identity to embed in the tokens
    /// * `now` - Reference Unix timestamp (seconds)
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored digest is malformed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_digest: &str,
        base: &ClaimsBase,
        now: i64,
    ) -> Result<TokenPair, AuthenticationError> {
        if !self.password_hasher.verify(stored_digest, password)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issuer.issue(base, now)?)
    }

    /// Issue a token pair without password verification.
    ///
    /// Used by the refresh flow, where a valid refresh token proves identity.
    pub fn issue_tokens(&self, base: &ClaimsBase, now: i64) -> Result<TokenPair, JwtError> {
        self.issuer.issue(base, now)
    }

    /// Validate an access token and return its claims.
    pub fn validate_token(&self, token: &str, now: i64) -> Result<TokenClaims, JwtError> {
        self.verifier.verify(token, now)
    }

    /// Validate a refresh token and return its claims.
    pub fn validate_refresh_token(&self, token: &str, now: i64) -> Result<TokenClaims, JwtError> {
        self.verifier.verify_refresh(token, now)
    }

    /// Validate an access token and check its role claim.
    pub fn require_role(&self, token: &str, role: &str, now: i64) -> bool {
        self.verifier.require_role(token, role, now)
    }

    /// Like [`require_role`](Self::require_role) but reports why access is denied.
    ///
    /// # Errors
    /// * `JwtError` - Token is invalid or expired
    /// * `InsufficientRole` - Token is valid but carries a different role
    pub fn authorize(
        &self,
        token: &str,
        role: &str,
        now: i64,
    ) -> Result<TokenClaims, AuthenticationError> {
        let claims = self.verifier.verify(token, now)?;

        if claims.role != role {
            return Err(AuthenticationError::InsufficientRole {
                required: role.to_string(),
            });
        }

        Ok(claims)
    }
}
