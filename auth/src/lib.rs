//! Authentication core
//!
//! Provides the stateless pieces of user authentication:
//! - Password hashing (PBKDF2-HMAC-SHA256 with a shared salt, or Argon2id)
//! - Access/refresh token issuance and verification (HMAC-signed JWT)
//! - Authentication coordination
//!
//! Every operation that depends on the clock takes the reference time as a
//! Unix timestamp so callers and tests control it.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{PasswordHasher, PasswordSettings};
//!
//! let hasher = PasswordHasher::new(&PasswordSettings::new(b"salt".to_vec(), 1_000)).unwrap();
//! let digest = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify(&digest, "my_password").unwrap());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{AuthSettings, Authenticator, ClaimsBase, PasswordSettings, TokenSettings};
//!
//! let auth = Authenticator::new(AuthSettings::new(
//!     TokenSettings::new(b"secret_key_at_least_32_bytes_long!".to_vec()),
//!     PasswordSettings::new(b"salt".to_vec(), 1_000),
//! ))
//! .unwrap();
//!
//! // Register: hash password
//! let digest = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue tokens
//! let now = 1_700_000_000;
//! let base = ClaimsBase::new("alice", "user");
//! let pair = auth.authenticate("password123", &digest, &base, now).unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&pair.access_token, now + 60).unwrap();
//! assert_eq!(claims.username, "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod settings;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jsonwebtoken::Algorithm;
pub use jwt::ClaimsBase;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenClaims;
pub use jwt::TokenKind;
pub use jwt::TokenPair;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordScheme;
pub use settings::AuthSettings;
pub use settings::PasswordSettings;
pub use settings::TokenSettings;
