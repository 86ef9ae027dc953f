//! Credential and bearer token library
//!
//! Provides the security-sensitive half of a username/password login flow:
//! - Password hashing (Argon2id, tunable cost)
//! - ES256 token issuance and verification
//! - Key material supplied through a [`KeyProvider`]
//! - `Authorization: Bearer` header guard
//! - Authentication coordination
//!
//! Storage of credentials is left to the caller; see the credential service.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```no_run
//! use std::sync::Arc;
//!
//! use auth::{AuthorizationGuard, FileKeyProvider, TokenIssuer, TokenVerifier};
//!
//! let keys = Arc::new(FileKeyProvider::new("keys/ec256-key-pri.pem", "keys/ec256-key-pub.pem"));
//! let issued = TokenIssuer::new(keys.clone()).issue_default("alice").unwrap();
//!
//! let guard = AuthorizationGuard::new(TokenVerifier::new(keys));
//! let claims = guard.authorize(&format!("Bearer {}", issued.token)).unwrap();
//! assert_eq!(claims.subject, "alice");
//! ```

pub mod authenticator;
pub mod guard;
pub mod jwt;
pub mod keys;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use guard::AuthorizationError;
pub use guard::AuthorizationGuard;
pub use jwt::ClaimSet;
pub use jwt::IssuedToken;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use jwt::TokenRejection;
pub use jwt::TokenVerifier;
pub use keys::FileKeyProvider;
pub use keys::KeyError;
pub use keys::KeyProvider;
pub use keys::KeySlot;
pub use keys::StaticKeyProvider;
pub use password::HashCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
