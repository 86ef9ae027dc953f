use async_trait::async_trait;
use sqlx::PgPool;

use crate::credential::errors::CredentialError;
use crate::credential::models::Credential;
use crate::credential::models::Username;
use crate::credential::ports::CredentialStore;
use crate::credential::ports::PutOutcome;

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn get_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Credential>, CredentialError> {
        let row: Option<(String, String)> = sqlx::query_as(
            r#"
            SELECT username, password_hash
            FROM credentials
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CredentialError::DatabaseError(e.to_string()))?;

        match row {
            Some((username, password_hash)) => Ok(Some(Credential {
                username: Username::new(username)?,
                password_hash,
            })),
            None => Ok(None),
        }
    }

    async fn put_if_absent(&self, credential: Credential) -> Result<PutOutcome, CredentialError> {
        // The primary key makes this a single conditional write.
        let result = sqlx::query(
            r#"
            INSERT INTO credentials (username, password_hash)
            VALUES ($1, $2)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(credential.username.as_str())
        .bind(&credential.password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| CredentialError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 1 {
            Ok(PutOutcome::Created)
        } else {
            Ok(PutOutcome::AlreadyExists)
        }
    }
}
