use std::collections::HashSet;
use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;
use serde::Deserialize;

use super::claims::ClaimSet;
use super::errors::TokenRejection;
use super::SIGNING_ALGORITHM;
use crate::keys::KeyProvider;

/// Header fields consulted before any key material is touched.
#[derive(Debug, Deserialize)]
struct UntrustedHeader {
    alg: String,
}

/// Validates ES256 bearer tokens.
///
/// Verification runs through a fixed sequence, each step able to reject:
/// parse the compact structure, check the declared algorithm, load the public
/// key, check the signature, check expiry. The algorithm check always runs
/// before the key is requested, so a token can never select how it is verified.
///
/// Holds no state between calls.
#[derive(Clone)]
pub struct TokenVerifier {
    keys: Arc<dyn KeyProvider>,
}

impl TokenVerifier {
    pub fn new(keys: Arc<dyn KeyProvider>) -> Self {
        Self { keys }
    }

    /// Verify `token` against the current public key and the current time.
    ///
    /// # Arguments
    /// * `token` - Compact JWS string (without the `Bearer ` scheme)
    ///
    /// # Returns
    /// Claims of an accepted token
    ///
    /// # Errors
    /// * `Malformed` - Not three base64url segments, unreadable header or missing claims
    /// * `AlgorithmMismatch` - Header declares anything other than ES256
    /// * `KeyUnavailable` - Public key could not be obtained or parsed
    /// * `BadSignature` - Signature does not match header and payload
    /// * `Expired` - Expiration time is not in the future
    pub fn verify(&self, token: &str) -> Result<ClaimSet, TokenRejection> {
        self.verify_at(token, Utc::now())
    }

    /// Verify `token` as if the current time were `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<ClaimSet, TokenRejection> {
        let header = parse_header(token)?;
        self.check_algorithm(&header)?;
        let key = self.load_key()?;
        let claims = self.check_signature(token, &key)?;

        if claims.is_expired(now.timestamp()) {
            return Err(TokenRejection::Expired);
        }

        Ok(claims)
    }

    fn check_algorithm(&self, header: &UntrustedHeader) -> Result<(), TokenRejection> {
        match header.alg.parse::<Algorithm>() {
            Ok(alg) if alg == SIGNING_ALGORITHM => Ok(()),
            _ => Err(TokenRejection::AlgorithmMismatch {
                expected: SIGNING_ALGORITHM,
                found: header.alg.clone(),
            }),
        }
    }

    fn load_key(&self) -> Result<DecodingKey, TokenRejection> {
        let pem = self
            .keys
            .verification_key()
            .map_err(|e| TokenRejection::KeyUnavailable(e.to_string()))?;

        DecodingKey::from_ec_pem(&pem)
            .map_err(|e| TokenRejection::KeyUnavailable(format!("Invalid verification key: {}", e)))
    }

    fn check_signature(&self, token: &str, key: &DecodingKey) -> Result<ClaimSet, TokenRejection> {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        // Expiry is checked against the caller's clock once the signature holds.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims = HashSet::from(["sub".to_string(), "exp".to_string()]);

        decode::<ClaimSet>(token, key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenRejection::BadSignature,
                ErrorKind::InvalidEcdsaKey | ErrorKind::InvalidKeyFormat => {
                    TokenRejection::KeyUnavailable(e.to_string())
                }
                _ => TokenRejection::Malformed(e.to_string()),
            })
    }
}

fn parse_header(token: &str) -> Result<UntrustedHeader, TokenRejection> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 || segments.iter().any(|segment| segment.is_empty()) {
        return Err(TokenRejection::Malformed(
            "expected three non-empty dot-separated segments".to_string(),
        ));
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(segments[0])
        .map_err(|e| TokenRejection::Malformed(format!("Header is not base64url: {}", e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| TokenRejection::Malformed(format!("Header is not valid JSON: {}", e)))
}
