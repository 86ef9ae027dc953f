use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::credential::errors::CredentialError;
use crate::credential::models::Credential;
use crate::credential::models::Username;
use crate::credential::ports::CredentialStore;
use crate::credential::ports::PutOutcome;

/// Process-local credential store.
///
/// Used when no database is configured and in tests. Contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    /// Map of username -> Credential
    credentials: Arc<RwLock<HashMap<String, Credential>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored credentials
    pub async fn len(&self) -> usize {
        self.credentials.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.credentials.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn get_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Credential>, CredentialError> {
        Ok(self.credentials.read().await.get(username.as_str()).cloned())
    }

    async fn put_if_absent(&self, credential: Credential) -> Result<PutOutcome, CredentialError> {
        // Check and insert under one write guard.
        let mut credentials = self.credentials.write().await;

        match credentials.entry(credential.username.as_str().to_string()) {
            Entry::Occupied(_) => Ok(PutOutcome::AlreadyExists),
            Entry::Vacant(entry) => {
                entry.insert(credential);
                Ok(PutOutcome::Created)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential(name: &str, hash: &str) -> Credential {
        Credential {
            username: Username::new(name.to_string()).unwrap(),
            password_hash: hash.to_string(),
        }
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = InMemoryCredentialStore::new();

        let outcome = store.put_if_absent(credential("alice", "h1")).await.unwrap();
        assert_eq!(outcome, PutOutcome::Created);

        let found = store
            .get_by_username(&Username::new("alice".to_string()).unwrap())
            .await
            .unwrap();
        assert_eq!(found, Some(credential("alice", "h1")));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let store = InMemoryCredentialStore::new();

        let found = store
            .get_by_username(&Username::new("alice".to_string()).unwrap())
            .await
            .unwrap();
        assert!(found.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_existing_credential_is_not_overwritten() {
        let store = InMemoryCredentialStore::new();

        store.put_if_absent(credential("alice", "h1")).await.unwrap();
        let outcome = store.put_if_absent(credential("alice", "h2")).await.unwrap();

        assert_eq!(outcome, PutOutcome::AlreadyExists);
        let found = store
            .get_by_username(&Username::new("alice".to_string()).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.password_hash, "h1");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_puts_create_exactly_once() {
        let store = InMemoryCredentialStore::new();

        let tasks: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .put_if_absent(credential("alice", &format!("h{}", i)))
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut created = 0;
        for task in tasks {
            if task.await.unwrap() == PutOutcome::Created {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(store.len().await, 1);
    }
}
