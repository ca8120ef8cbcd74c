use serde::Deserialize;
use serde::Serialize;

/// Identity carried by every token, before an expiry is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimsBase {
    pub username: String,
    pub role: String,
}

impl ClaimsBase {
    pub fn new(username: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: role.into(),
        }
    }

    /// Attach an expiry (Unix timestamp) to produce full claims.
    pub fn expiring_at(&self, exp: i64) -> TokenClaims {
        TokenClaims {
            username: self.username.clone(),
            role: self.role.clone(),
            exp,
        }
    }
}

/// Token payload shared by access and refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    pub username: String,
    pub role: String,
    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

impl TokenClaims {
    /// A token is valid strictly before its expiry.
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.exp
    }

    pub fn base(&self) -> ClaimsBase {
        ClaimsBase::new(self.username.clone(), self.role.clone())
    }
}

/// Which of the two tokens of a pair a token is.
///
/// Both kinds share the [`TokenClaims`] payload; the kind travels in the
/// JWT header `typ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    /// Value of the JWT header `typ` for this kind.
    pub const fn header_type(&self) -> &'static str {
        match self {
            TokenKind::Access => "at+jwt",
            TokenKind::Refresh => "rt+jwt",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// Access and refresh token returned together on login and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
