use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::TokenData;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the claims type. Only the symmetric HMAC algorithms are
/// accepted. Expiry is not checked here: callers compare `exp` against
/// their own reference time (see [`TokenVerifier`](super::TokenVerifier)).
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    /// * `algorithm` - HS256, HS384 or HS512
    ///
    /// # Errors
    /// * `MissingSecret` - Secret is empty
    /// * `UnsupportedAlgorithm` - Algorithm is not an HMAC algorithm
    pub fn new(secret: &[u8], algorithm: Algorithm) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::MissingSecret);
        }

        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(Self {
                encoding_key: EncodingKey::from_secret(secret),
                decoding_key: DecodingKey::from_secret(secret),
                algorithm,
            }),
            other => Err(JwtError::UnsupportedAlgorithm(format!("{:?}", other))),
        }
    }

    /// Encode claims into a signed token whose header carries `typ`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T, typ: &str) -> Result<String, JwtError> {
        let mut header = Header::new(self.algorithm);
        header.typ = Some(typ.to_string());

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode a token and check its signature. An `exp` claim must be present.
    ///
    /// The header is returned with the claims so callers can check `typ`.
    ///
    /// # Errors
    /// * `SignatureInvalid` - Signature does not match or algorithm differs
    /// * `Malformed` - Token is not a decodable JWT or lacks required claims
    pub fn decode<T: for<'de> Deserialize<'de>>(
        &self,
        token: &str,
    ) -> Result<TokenData<T>, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        decode::<T>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => JwtError::SignatureInvalid,
            ErrorKind::ExpiredSignature => JwtError::Expired,
            _ => JwtError::Malformed(e.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestClaims {
        sub: String,
        role: String,
        exp: i64,
    }

    fn claims() -> TestClaims {
        TestClaims {
            sub: "user123".to_string(),
            role: "admin".to_string(),
            exp: 1_000,
        }
    }

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!", Algorithm::HS256)
            .expect("valid handler");

        let token = handler
            .encode(&claims(), "JWT")
            .expect("Failed to encode token");
        assert_eq!(token.split('.').count(), 3);

        // exp lies in the past; the handler leaves expiry to the caller
        let decoded = handler
            .decode::<TestClaims>(&token)
            .expect("Failed to decode token");
        assert_eq!(decoded.claims, claims());
        assert_eq!(decoded.header.typ.as_deref(), Some("JWT"));
    }

    #[test]
    fn test_decode_invalid_token() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!", Algorithm::HS256)
            .unwrap();

        let result = handler.decode::<TestClaims>("invalid.token.here");
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_header_type_is_preserved() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!", Algorithm::HS256)
            .unwrap();

        let token = handler.encode(&claims(), "rt+jwt").unwrap();

        let decoded = handler.decode::<TestClaims>(&token).unwrap();
        assert_eq!(decoded.header.typ.as_deref(), Some("rt+jwt"));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!", Algorithm::HS256)
            .unwrap();
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!", Algorithm::HS256)
            .unwrap();

        let token = handler1.encode(&claims(), "JWT").unwrap();

        let result = handler2.decode::<TestClaims>(&token);
        assert_eq!(result.unwrap_err(), JwtError::SignatureInvalid);
    }

    #[test]
    fn test_decode_with_other_algorithm() {
        let secret = b"shared_secret_at_least_32_bytes_long!";
        let hs512 = JwtHandler::new(secret, Algorithm::HS512).unwrap();
        let hs256 = JwtHandler::new(secret, Algorithm::HS256).unwrap();

        let token = hs512.encode(&claims(), "JWT").unwrap();

        assert_eq!(
            hs256.decode::<TestClaims>(&token).unwrap_err(),
            JwtError::SignatureInvalid
        );
    }

    #[test]
    fn test_missing_exp_is_malformed() {
        #[derive(Serialize, Deserialize)]
        struct NoExp {
            sub: String,
        }

        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!", Algorithm::HS256)
            .unwrap();
        let token = handler
            .encode(
                &NoExp {
                    sub: "user123".to_string(),
                },
                "JWT",
            )
            .unwrap();

        assert!(matches!(
            handler.decode::<TestClaims>(&token),
            Err(JwtError::Malformed(_))
        ));
    }

    #[test]
    fn test_rejects_bad_configuration() {
        assert!(matches!(
            JwtHandler::new(b"", Algorithm::HS256),
            Err(JwtError::MissingSecret)
        ));
        assert!(matches!(
            JwtHandler::new(b"secret", Algorithm::RS256),
            Err(JwtError::UnsupportedAlgorithm(_))
        ));
    }
}
