use serde::Deserialize;

use super::argon2::Argon2Hasher;
use super::errors::PasswordError;
use super::pbkdf2::Pbkdf2Hasher;
use crate::settings::PasswordSettings;

/// Digest scheme used when hashing new passwords.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordScheme {
    /// PBKDF2-HMAC-SHA256 with the shared salt, base64 encoded.
    #[default]
    Pbkdf2,
    /// Argon2id with a per-digest random salt, PHC encoded.
    Argon2,
}

impl PasswordScheme {
    /// Detect which scheme produced a stored digest.
    pub fn of_digest(digest: &str) -> Self {
        if Argon2Hasher::recognizes(digest) {
            PasswordScheme::Argon2
        } else {
            PasswordScheme::Pbkdf2
        }
    }
}

/// Password hasher used by the rest of the system.
///
/// New digests are produced with the configured scheme. Verification
/// dispatches on the stored digest so digests from either scheme stay valid.
#[derive(Clone)]
pub struct PasswordHasher {
    scheme: PasswordScheme,
    pbkdf2: Pbkdf2Hasher,
    argon2: Argon2Hasher,
}

impl PasswordHasher {
    /// Create a hasher from password settings.
    ///
    /// # Errors
    /// * `InvalidSettings` - Salt is empty or iteration count is zero
    pub fn new(settings: &PasswordSettings) -> Result<Self, PasswordError> {
        Ok(Self {
            scheme: settings.scheme,
            pbkdf2: Pbkdf2Hasher::new(settings.salt.clone(), settings.iterations)?,
            argon2: Argon2Hasher,
        })
    }

    /// Hash a plaintext password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        match self.scheme {
            PasswordScheme::Pbkdf2 => Ok(self.pbkdf2.hash(password)),
            PasswordScheme::Argon2 => self.argon2.hash(password),
        }
    }

    /// Verify a plaintext password against a stored digest.
    ///
    /// # Returns
    /// True if the password matches, false on any mismatch
    ///
    /// # Errors
    /// * `InvalidDigestFormat` - Stored digest is malformed
    pub fn verify(&self, digest: &str, password: &str) -> Result<bool, PasswordError> {
        match PasswordScheme::of_digest(digest) {
            PasswordScheme::Pbkdf2 => self.pbkdf2.verify(digest, password),
            PasswordScheme::Argon2 => self.argon2.verify(digest, password),
        }
    }

    /// Whether a stored digest was produced by a scheme other than the configured one.
    pub fn needs_rehash(&self, digest: &str) -> bool {
        PasswordScheme::of_digest(digest) != self.scheme
    }
}
