use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as _;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Prefix shared by every Argon2 PHC string.
pub const PHC_PREFIX: &str = "$argon2";

/// Argon2id hasher with a random salt per digest.
///
/// Digests are PHC strings carrying algorithm, parameters, salt and hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    /// Hash a plaintext password with a freshly generated salt.
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a PHC digest.
    ///
    /// # Errors
    /// * `InvalidDigestFormat` - Digest is not a parseable PHC string
    pub fn verify(&self, digest: &str, password: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(digest)
            .map_err(|e| PasswordError::InvalidDigestFormat(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Whether a digest looks like an Argon2 PHC string.
    pub fn recognizes(digest: &str) -> bool {
        digest.starts_with(PHC_PREFIX)
    }
}
