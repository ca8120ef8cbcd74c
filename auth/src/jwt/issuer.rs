use std::sync::Arc;

use chrono::Duration;

use super::claims::ClaimsBase;
use super::claims::TokenKind;
use super::claims::TokenPair;
use super::errors::JwtError;
use super::handler::JwtHandler;

/// Issues access/refresh token pairs.
///
/// Tokens are self-contained; nothing is recorded server-side.
pub struct TokenIssuer {
    handler: Arc<JwtHandler>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer with the given token lifetimes.
    ///
    /// # Errors
    /// * `InvalidLifetime` - A lifetime is not positive
    pub fn new(
        handler: Arc<JwtHandler>,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Result<Self, JwtError> {
        for (kind, ttl) in [(TokenKind::Access, access_ttl), (TokenKind::Refresh, refresh_ttl)] {
            if ttl <= Duration::zero() {
                return Err(JwtError::InvalidLifetime(format!(
                    "{} token lifetime must be positive, got {}s",
                    kind,
                    ttl.num_seconds()
                )));
            }
        }

        Ok(Self {
            handler,
            access_ttl,
            refresh_ttl,
        })
    }

    /// Sign an access token and a refresh token for the given identity.
    ///
    /// # Arguments
    /// * `base` - Username and role to embed
    /// * `now` - Reference Unix timestamp (seconds) the lifetimes count from
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, base: &ClaimsBase, now: i64) -> Result<TokenPair, JwtError> {
        let access_claims = base.expiring_at(now + self.access_ttl.num_seconds());
        let refresh_claims = base.expiring_at(now + self.refresh_ttl.num_seconds());

        Ok(TokenPair {
            access_token: self
                .handler
                .encode(&access_claims, TokenKind::Access.header_type())?,
            refresh_token: self
                .handler
                .encode(&refresh_claims, TokenKind::Refresh.header_type())?,
        })
    }
}
