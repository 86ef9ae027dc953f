use std::sync::Arc;

use auth::Authenticator;
use auth::AuthorizationGuard;
use auth::FileKeyProvider;
use auth::KeyProvider;
use auth::PasswordHasher;
use auth::TokenIssuer;
use auth::TokenVerifier;
use credential_service::config::Config;
use credential_service::credential::ports::AuthenticationServicePort;
use credential_service::credential::service::AuthenticationService;
use credential_service::inbound::http::router::create_router;
use credential_service::repositories::InMemoryCredentialStore;
use credential_service::repositories::PostgresCredentialStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "credential_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "credential-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        request_timeout_secs = config.server.request_timeout_secs,
        database = config.database.is_some(),
        private_key_path = %config.jwt.private_key_path,
        public_key_path = %config.jwt.public_key_path,
        token_ttl_minutes = config.jwt.expiration_minutes,
        "Configuration loaded"
    );

    let keys: Arc<dyn KeyProvider> = Arc::new(FileKeyProvider::new(
        &config.jwt.private_key_path,
        &config.jwt.public_key_path,
    ));
    // Keys are read per request, so a missing file is reported but not fatal.
    for result in [keys.signing_key(), keys.verification_key()] {
        if let Err(e) = result {
            tracing::error!(error = %e, "Key material unavailable at startup");
        }
    }

    let password_hasher = PasswordHasher::with_cost(config.password.cost())?;
    let token_issuer = TokenIssuer::new(Arc::clone(&keys)).with_ttl(config.jwt.token_ttl()?);
    let authenticator = Arc::new(Authenticator::new(password_hasher, token_issuer));
    let authorization_guard = Arc::new(AuthorizationGuard::new(TokenVerifier::new(keys)));

    let authentication_service: Arc<dyn AuthenticationServicePort> = match &config.database {
        Some(database) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .acquire_timeout(database.acquire_timeout())
                .connect(&database.url)
                .await?;
            tracing::info!(
                max_connections = database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let store = Arc::new(PostgresCredentialStore::new(pg_pool));
            Arc::new(AuthenticationService::new(store, authenticator))
        }
        None => {
            tracing::warn!("No database configured, credentials are kept in memory");
            let store = Arc::new(InMemoryCredentialStore::new());
            Arc::new(AuthenticationService::new(store, authenticator))
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        authentication_service,
        authorization_guard,
        config.server.request_timeout(),
    );

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
