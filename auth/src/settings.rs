use chrono::Duration;
use jsonwebtoken::Algorithm;

use crate::password::PasswordScheme;

/// Default lifetime of an access token.
pub const DEFAULT_ACCESS_TTL_MINUTES: i64 = 30;

/// Default lifetime of a refresh token.
pub const DEFAULT_REFRESH_TTL_DAYS: i64 = 130;

/// Process-wide authentication settings, built once at startup.
#[derive(Clone)]
pub struct AuthSettings {
    pub token: TokenSettings,
    pub password: PasswordSettings,
}

impl AuthSettings {
    pub fn new(token: TokenSettings, password: PasswordSettings) -> Self {
        Self { token, password }
    }
}

/// Token signing settings shared by the issuer and the verifier.
#[derive(Clone)]
pub struct TokenSettings {
    /// Symmetric signing secret
    pub secret: Vec<u8>,
    /// HMAC signing algorithm (HS256, HS384 or HS512)
    pub algorithm: Algorithm,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl TokenSettings {
    /// Settings with HS256 and the default 30 minute / 130 day lifetimes.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: Algorithm::HS256,
            access_ttl: Duration::minutes(DEFAULT_ACCESS_TTL_MINUTES),
            refresh_ttl: Duration::days(DEFAULT_REFRESH_TTL_DAYS),
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = ttl;
        self
    }

    pub fn with_refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = ttl;
        self
    }
}

/// Password digest settings.
#[derive(Clone)]
pub struct PasswordSettings {
    pub scheme: PasswordScheme,
    /// Shared PBKDF2 salt
    pub salt: Vec<u8>,
    /// PBKDF2 iteration count
    pub iterations: u32,
}

impl PasswordSettings {
    /// PBKDF2 settings with the given salt and iteration count.
    pub fn new(salt: impl Into<Vec<u8>>, iterations: u32) -> Self {
        Self {
            scheme: PasswordScheme::Pbkdf2,
            salt: salt.into(),
            iterations,
        }
    }

    pub fn with_scheme(mut self, scheme: PasswordScheme) -> Self {
        self.scheme = scheme;
        self
    }
}
