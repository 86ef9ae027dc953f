use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use super::errors::KeyError;

/// Named key slot exposed by a [`KeyProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySlot {
    /// EC private key used to sign tokens
    Signing,
    /// EC public key used to verify tokens
    Verification,
}

impl fmt::Display for KeySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySlot::Signing => f.write_str("signing"),
            KeySlot::Verification => f.write_str("verification"),
        }
    }
}

/// Source of PEM-encoded EC key material.
///
/// Implementations are consulted on every signing or verification call and
/// must not cache beyond a single call, so swapping the key pair out of band
/// takes effect immediately.
#[cfg_attr(test, mockall::automock)]
pub trait KeyProvider: Send + Sync {
    /// PEM-encoded PKCS#8 EC private key.
    ///
    /// SEC1 (`BEGIN EC PRIVATE KEY`) keys are rejected when signing; convert
    /// them with `openssl pkcs8 -topk8 -nocrypt`.
    ///
    /// # Errors
    /// * `Unavailable` - Key material could not be obtained
    fn signing_key(&self) -> Result<Vec<u8>, KeyError>;

    /// PEM-encoded SubjectPublicKeyInfo EC public key.
    ///
    /// # Errors
    /// * `Unavailable` - Key material could not be obtained
    fn verification_key(&self) -> Result<Vec<u8>, KeyError>;
}

/// Key provider over key material held in memory.
///
/// Suited for embedded blobs (`include_bytes!`) and secrets injected at startup.
/// Either slot may be left empty, e.g. a verification-only deployment.
#[derive(Clone, Default)]
pub struct StaticKeyProvider {
    signing: Option<Vec<u8>>,
    verification: Option<Vec<u8>>,
}

impl StaticKeyProvider {
    /// Create a provider holding both halves of a key pair.
    pub fn new(signing_pem: impl Into<Vec<u8>>, verification_pem: impl Into<Vec<u8>>) -> Self {
        Self {
            signing: Some(signing_pem.into()),
            verification: Some(verification_pem.into()),
        }
    }

    /// Create a provider that can only verify tokens.
    pub fn verification_only(verification_pem: impl Into<Vec<u8>>) -> Self {
        Self {
            signing: None,
            verification: Some(verification_pem.into()),
        }
    }

    fn slot(key: &Option<Vec<u8>>, slot: KeySlot) -> Result<Vec<u8>, KeyError> {
        key.clone().ok_or_else(|| KeyError::Unavailable {
            slot,
            reason: "no key material configured".to_string(),
        })
    }
}

impl fmt::Debug for StaticKeyProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticKeyProvider")
            .field("signing", &self.signing.is_some())
            .field("verification", &self.verification.is_some())
            .finish()
    }
}

impl KeyProvider for StaticKeyProvider {
    fn signing_key(&self) -> Result<Vec<u8>, KeyError> {
        Self::slot(&self.signing, KeySlot::Signing)
    }

    fn verification_key(&self) -> Result<Vec<u8>, KeyError> {
        Self::slot(&self.verification, KeySlot::Verification)
    }
}

/// Key provider reading PEM files from disk on every call.
#[derive(Debug, Clone)]
pub struct FileKeyProvider {
    signing_path: PathBuf,
    verification_path: PathBuf,
}

impl FileKeyProvider {
    /// Create a provider over a private and a public key file.
    ///
    /// # Arguments
    /// * `signing_path` - Path to the PKCS#8 PEM private key
    /// * `verification_path` - Path to the PEM public key
    pub fn new(signing_path: impl Into<PathBuf>, verification_path: impl Into<PathBuf>) -> Self {
        Self {
            signing_path: signing_path.into(),
            verification_path: verification_path.into(),
        }
    }

    fn read(path: &Path, slot: KeySlot) -> Result<Vec<u8>, KeyError> {
        fs::read(path).map_err(|e| KeyError::Unavailable {
            slot,
            reason: format!("{}: {}", path.display(), e),
        })
    }
}

impl KeyProvider for FileKeyProvider {
    fn signing_key(&self) -> Result<Vec<u8>, KeyError> {
        Self::read(&self.signing_path, KeySlot::Signing)
    }

    fn verification_key(&self) -> Result<Vec<u8>, KeyError> {
        Self::read(&self.verification_path, KeySlot::Verification)
    }
}
