use std::sync::Arc;

use super::claims::TokenClaims;
use super::claims::TokenKind;
use super::errors::JwtError;
use super::handler::JwtHandler;

/// Validates tokens produced by [`TokenIssuer`](super::TokenIssuer).
///
/// Expiry is the only invalidation mechanism; there is no revocation list.
pub struct TokenVerifier {
    handler: Arc<JwtHandler>,
}

impl TokenVerifier {
    pub fn new(handler: Arc<JwtHandler>) -> Self {
        Self { handler }
    }

    /// Check an access token's signature, kind and expiry, returning the embedded claims.
    ///
    /// # Arguments
    /// * `token` - Encoded token
    /// * `now` - Reference Unix timestamp (seconds); the token must satisfy `now < exp`
    ///
    /// # Errors
    /// * `SignatureInvalid` - Signature does not match the configured secret
    /// * `WrongKind` - Token is a refresh token
    /// * `Expired` - `now` is at or past the token expiry
    /// * `Malformed` - Token cannot be decoded
    pub fn verify(&self, token: &str, now: i64) -> Result<TokenClaims, JwtError> {
        self.verify_kind(token, TokenKind::Access, now)
    }

    /// Like [`verify`](Self::verify) but only accepts refresh tokens.
    pub fn verify_refresh(&self, token: &str, now: i64) -> Result<TokenClaims, JwtError> {
        self.verify_kind(token, TokenKind::Refresh, now)
    }

    fn verify_kind(
        &self,
        token: &str,
        kind: TokenKind,
        now: i64,
    ) -> Result<TokenClaims, JwtError> {
        let token_data = self.handler.decode::<TokenClaims>(token)?;

        if token_data.header.typ.as_deref() != Some(kind.header_type()) {
            return Err(JwtError::WrongKind(kind));
        }
        if token_data.claims.is_expired(now) {
            return Err(JwtError::Expired);
        }

        Ok(token_data.claims)
    }

    /// Verify the access token and check that its role claim equals `role`.
    pub fn require_role(&self, token: &str, role: &str, now: i64) -> bool {
        self.verify(token, now)
            .map(|claims| claims.role == role)
            .unwrap_or(false)
    }
}
