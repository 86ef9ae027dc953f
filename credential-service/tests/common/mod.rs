#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::AuthorizationGuard;
use auth::HashCost;
use auth::PasswordHasher;
use auth::StaticKeyProvider;
use auth::TokenIssuer;
use auth::TokenVerifier;
use credential_service::credential::service::AuthenticationService;
use credential_service::inbound::http::router::create_router;
use credential_service::repositories::InMemoryCredentialStore;

pub const PRIVATE_KEY: &[u8] = include_bytes!("../../keys/ec256-key-pri.pem");
pub const PUBLIC_KEY: &[u8] = include_bytes!("../../keys/ec256-key-pub.pem");

/// Argon2 parameters small enough for fast tests.
pub fn cheap_hasher() -> PasswordHasher {
    PasswordHasher::with_cost(HashCost {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .expect("Failed to build password hasher")
}

pub fn test_keys() -> Arc<StaticKeyProvider> {
    Arc::new(StaticKeyProvider::new(PRIVATE_KEY, PUBLIC_KEY))
}

pub fn test_authenticator() -> Arc<Authenticator> {
    Arc::new(Authenticator::new(
        cheap_hasher(),
        TokenIssuer::new(test_keys()),
    ))
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: InMemoryCredentialStore,
    pub issuer: TokenIssuer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = InMemoryCredentialStore::new();
        let authentication_service = Arc::new(AuthenticationService::new(
            Arc::new(store.clone()),
            test_authenticator(),
        ));
        let authorization_guard =
            Arc::new(AuthorizationGuard::new(TokenVerifier::new(test_keys())));

        let router = create_router(
            authentication_service,
            authorization_guard,
            Duration::from_secs(10),
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            store,
            issuer: TokenIssuer::new(test_keys()),
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a credential and return the response
    pub async fn register(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/registration")
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the response
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/authentication")
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the issued token, panicking on failure
    pub async fn login_token(&self, username: &str, password: &str) -> String {
        let response = self.login(username, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }
}
