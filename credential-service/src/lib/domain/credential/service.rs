use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::credential::errors::CredentialError;
use crate::credential::models::AccessToken;
use crate::credential::models::Credential;
use crate::credential::models::LoginCommand;
use crate::credential::models::RegisterCommand;
use crate::credential::models::Username;
use crate::credential::ports::AuthenticationServicePort;
use crate::credential::ports::CredentialStore;
use crate::credential::ports::PutOutcome;

/// Domain service implementation for register and login.
///
/// Concrete implementation of AuthenticationServicePort with dependency injection.
pub struct AuthenticationService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    authenticator: Arc<Authenticator>,
}

impl<CS> AuthenticationService<CS>
where
    CS: CredentialStore,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `authenticator` - Password hashing and token signing
    pub fn new(store: Arc<CS>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            store,
            authenticator,
        }
    }
}

#[async_trait]
impl<CS> AuthenticationServicePort for AuthenticationService<CS>
where
    CS: CredentialStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<Username, CredentialError> {
        let authenticator = Arc::clone(&self.authenticator);
        let RegisterCommand { username, password } = command;
        let password_hash = run_blocking(move || authenticator.hash_password(&password))
            .await?
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing failed");
                CredentialError::Password(e)
            })?;

        let credential = Credential {
            username: username.clone(),
            password_hash,
        };

        match self.store.put_if_absent(credential).await? {
            PutOutcome::Created => {
                tracing::info!(username = %username, "Credential registered");
                Ok(username)
            }
            PutOutcome::AlreadyExists => {
                tracing::debug!(username = %username, "Username already registered");
                Err(CredentialError::AlreadyExists(username.to_string()))
            }
        }
    }

    async fn login(&self, command: LoginCommand) -> Result<AccessToken, CredentialError> {
        let authenticator = Arc::clone(&self.authenticator);
        let LoginCommand { username, password } = command;

        let Some(credential) = self.store.get_by_username(&username).await? else {
            run_blocking(move || authenticator.reject_unknown_user(&password)).await?;
            tracing::debug!(username = %username, "Login for unknown username");
            return Err(CredentialError::NotFound(username.to_string()));
        };

        run_blocking(move || {
            authenticator.authenticate(
                &password,
                &credential.password_hash,
                credential.username.as_str(),
            )
        })
        .await?
        .map(AccessToken::from)
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => {
                tracing::debug!(username = %username, "Login with wrong password");
                CredentialError::WrongPassword
            }
            AuthenticationError::PasswordError(err) => {
                tracing::error!(
                    username = %username,
                    error = %err,
                    "Stored password hash could not be verified"
                );
                CredentialError::Password(err)
            }
            AuthenticationError::TokenError(err) => {
                tracing::error!(error = %err, "Token signing failed");
                CredentialError::Token(err)
            }
        })
    }
}

/// Run CPU-bound password work off the async worker threads.
async fn run_blocking<F, T>(work: F) -> Result<T, CredentialError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|e| {
        tracing::error!(error = %e, "Password task did not complete");
        CredentialError::TaskFailed(e.to_string())
    })
}
