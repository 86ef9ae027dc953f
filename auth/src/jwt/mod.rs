use jsonwebtoken::Algorithm;

pub mod claims;
pub mod errors;
pub mod issuer;
pub mod verifier;

#[cfg(test)]
pub(crate) mod test_support;

pub use claims::ClaimSet;
pub use errors::TokenError;
pub use errors::TokenRejection;
pub use issuer::IssuedToken;
pub use issuer::TokenIssuer;
pub use issuer::DEFAULT_TOKEN_TTL_SECS;
pub use verifier::TokenVerifier;

/// ECDSA over P-256 with SHA-256, the only algorithm tokens are signed or accepted with.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::ES256;
