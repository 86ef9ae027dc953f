use chrono::DateTime;
use chrono::Utc;
use thiserror::Error;

use crate::jwt::ClaimSet;
use crate::jwt::TokenRejection;
use crate::jwt::TokenVerifier;

/// Authorization scheme prefix, including its single separating space.
const BEARER_PREFIX: &str = "Bearer ";

/// Reason a request was not authorized.
///
/// Callers crossing a trust boundary should report every variant as the same
/// generic failure and keep the distinction for server-side diagnostics.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("Invalid authorization header")]
    InvalidHeader,

    #[error("Token rejected: {0}")]
    Token(#[from] TokenRejection),
}

/// Authorizes requests carrying an `Authorization: Bearer <token>` header.
#[derive(Clone)]
pub struct AuthorizationGuard {
    verifier: TokenVerifier,
}

impl AuthorizationGuard {
    pub fn new(verifier: TokenVerifier) -> Self {
        Self { verifier }
    }

    /// Authorize a raw `Authorization` header value.
    ///
    /// The header must be exactly `Bearer <token>`: case-sensitive scheme, one
    /// space, and a token without whitespace. Anything else is rejected before
    /// the verifier (and therefore any key material) is consulted.
    ///
    /// # Errors
    /// * `InvalidHeader` - Header does not have the bearer shape
    /// * `Token` - Verifier rejected the token
    pub fn authorize(&self, header_value: &str) -> Result<ClaimSet, AuthorizationError> {
        self.authorize_at(header_value, Utc::now())
    }

    /// Authorize as if the current time were `now`.
    pub fn authorize_at(
        &self,
        header_value: &str,
        now: DateTime<Utc>,
    ) -> Result<ClaimSet, AuthorizationError> {
        let token = bearer_token(header_value).ok_or(AuthorizationError::InvalidHeader)?;
        Ok(self.verifier.verify_at(token, now)?)
    }
}

fn bearer_token(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix(BEARER_PREFIX)
        .filter(|token| !token.is_empty() && !token.chars().any(char::is_whitespace))
}
