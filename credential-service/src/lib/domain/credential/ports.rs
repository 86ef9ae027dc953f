use async_trait::async_trait;

use crate::credential::errors::CredentialError;
use crate::credential::models::AccessToken;
use crate::credential::models::Credential;
use crate::credential::models::LoginCommand;
use crate::credential::models::RegisterCommand;
use crate::credential::models::Username;

/// Outcome of a conditional credential write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    Created,
    AlreadyExists,
}

/// Port for register and login operations.
#[async_trait]
pub trait AuthenticationServicePort: Send + Sync + 'static {
    /// Register a new username/password pair.
    ///
    /// # Arguments
    /// * `command` - Validated username and plaintext password
    ///
    /// # Returns
    /// Registered username
    ///
    /// # Errors
    /// * `AlreadyExists` - Username is already registered
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Username, CredentialError>;

    /// Exchange a password for a signed access token.
    ///
    /// # Arguments
    /// * `command` - Username and plaintext password
    ///
    /// # Returns
    /// Access token for the username
    ///
    /// # Errors
    /// * `NotFound` - No credential for the username
    /// * `WrongPassword` - Password does not match
    /// * `Password` - Stored hash is corrupt
    /// * `Token` - Token could not be signed
    /// * `DatabaseError` - Store operation failed
    async fn login(&self, command: LoginCommand) -> Result<AccessToken, CredentialError>;
}

/// Persistence operations for credentials, keyed by username.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve credential by username.
    ///
    /// # Arguments
    /// * `username` - Username to search for
    ///
    /// # Returns
    /// Optional credential (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn get_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Credential>, CredentialError>;

    /// Store credential unless one already exists for its username.
    ///
    /// The existence check and the write are a single atomic operation: of
    /// any number of concurrent calls for one username, exactly one observes
    /// `Created`.
    ///
    /// # Arguments
    /// * `credential` - Credential to persist
    ///
    /// # Returns
    /// `Created` or `AlreadyExists`
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn put_if_absent(&self, credential: Credential) -> Result<PutOutcome, CredentialError>;
}
