pub mod claims;
pub mod errors;
pub mod handler;
pub mod issuer;
pub mod verifier;

pub use claims::ClaimsBase;
pub use claims::TokenClaims;
pub use claims::TokenKind;
pub use claims::TokenPair;
pub use errors::JwtError;
pub use handler::JwtHandler;
pub use issuer::TokenIssuer;
pub use verifier::TokenVerifier;
