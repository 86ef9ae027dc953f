use jsonwebtoken::Algorithm;
use thiserror::Error;

use crate::keys::KeyError;

/// Error type for token issuance.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Signing key unavailable: {0}")]
    KeyUnavailable(#[from] KeyError),

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),
}

/// Reason a bearer token was rejected by the verifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenRejection {
    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token algorithm mismatch: expected {expected:?}, found {found}")]
    AlgorithmMismatch { expected: Algorithm, found: String },

    #[error("Verification key unavailable: {0}")]
    KeyUnavailable(String),

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is expired")]
    Expired,
}
