use auth::AuthenticationError;
use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

use crate::user::errors::UserError;

/// Errors of the login and refresh flows.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Stored password digest is malformed: {0}")]
    InvalidDigestFormat(String),

    /// Token failed signature, expiry or format checks.
    #[error("Invalid token: {0}")]
    Token(#[from] JwtError),

    #[error("User store error: {0}")]
    User(UserError),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFoundByUsername(username) => AuthError::UserNotFound(username),
            other => AuthError::User(other),
        }
    }
}

impl From<AuthenticationError> for AuthError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
            AuthenticationError::PasswordError(PasswordError::InvalidDigestFormat(msg)) => {
                AuthError::InvalidDigestFormat(msg)
            }
            AuthenticationError::JwtError(e) => AuthError::Token(e),
            other => AuthError::Unknown(other.to_string()),
        }
    }
}
