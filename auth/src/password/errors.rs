use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored digest could not be parsed for any supported scheme.
    #[error("Invalid password digest format: {0}")]
    InvalidDigestFormat(String),

    #[error("Invalid password settings: {0}")]
    InvalidSettings(String),
}
