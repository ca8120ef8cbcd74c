use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use constant_time_eq::constant_time_eq;
use sha2::Sha256;

use super::errors::PasswordError;

/// Length in bytes of a derived PBKDF2-HMAC-SHA256 key.
pub const DIGEST_LENGTH: usize = 32;

/// PBKDF2-HMAC-SHA256 hasher with a fixed, process-wide salt.
///
/// Digests are deterministic for a given salt and iteration count and are
/// stored as standard base64 of the 32-byte derived key.
#[derive(Clone)]
pub struct Pbkdf2Hasher {
    salt: Vec<u8>,
    iterations: u32,
}

impl Pbkdf2Hasher {
    /// Create a hasher from the shared salt and iteration count.
    ///
    /// # Errors
    /// * `InvalidSettings` - Salt is empty or iteration count is zero
    pub fn new(salt: impl Into<Vec<u8>>, iterations: u32) -> Result<Self, PasswordError> {
        let salt = salt.into();
        if salt.is_empty() {
            return Err(PasswordError::InvalidSettings(
                "PBKDF2 salt must not be empty".to_string(),
            ));
        }
        if iterations == 0 {
            return Err(PasswordError::InvalidSettings(
                "PBKDF2 iteration count must be positive".to_string(),
            ));
        }

        Ok(Self { salt, iterations })
    }

    /// Derive the base64-encoded digest of a plaintext password.
    pub fn hash(&self, password: &str) -> String {
        STANDARD.encode(self.derive(password))
    }

    /// Recompute the digest of `password` and compare it with `digest` in constant time.
    ///
    /// # Errors
    /// * `InvalidDigestFormat` - Digest is not base64 or has the wrong length
    pub fn verify(&self, digest: &str, password: &str) -> Result<bool, PasswordError> {
        let stored = STANDARD
            .decode(digest)
            .map_err(|e| PasswordError::InvalidDigestFormat(e.to_string()))?;

        if stored.len() != DIGEST_LENGTH {
            return Err(PasswordError::InvalidDigestFormat(format!(
                "expected {} bytes, got {}",
                DIGEST_LENGTH,
                stored.len()
            )));
        }

        Ok(constant_time_eq(&stored, &self.derive(password)))
    }

    fn derive(&self, password: &str) -> [u8; DIGEST_LENGTH] {
        let mut key = [0u8; DIGEST_LENGTH];
        pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), &self.salt, self.iterations, &mut key);
        key
    }
}
