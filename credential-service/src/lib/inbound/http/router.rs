use std::sync::Arc;
use std::time::Duration;

use auth::AuthorizationGuard;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authenticate::authenticate;
use super::handlers::authorized_hello::authorized_hello;
use super::handlers::hello::hello;
use super::handlers::register::register;
use super::middleware::authorize;
use crate::credential::ports::AuthenticationServicePort;

#[derive(Clone)]
pub struct AppState {
    pub authentication_service: Arc<dyn AuthenticationServicePort>,
    pub authorization_guard: Arc<AuthorizationGuard>,
}

pub fn create_router(
    authentication_service: Arc<dyn AuthenticationServicePort>,
    authorization_guard: Arc<AuthorizationGuard>,
    request_timeout: Duration,
) -> Router {
    let state = AppState {
        authentication_service,
        authorization_guard,
    };

    let public_routes = Router::new()
        .route("/registration", post(register))
        .route("/authentication", post(authenticate))
        .route("/hello", get(hello));

    let protected_routes = Router::new()
        .route("/authorized_hello", get(authorized_hello))
        .route_layer(middleware::from_fn_with_state(state.clone(), authorize));

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use auth::Authenticator;
    use auth::HashCost;
    use auth::PasswordHasher;
    use auth::StaticKeyProvider;
    use auth::TokenIssuer;
    use auth::TokenVerifier;
    use axum::http::header::AUTHORIZATION;
    use axum::http::header::CONTENT_TYPE;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use super::*;
    use crate::credential::service::AuthenticationService;
    use crate::repositories::InMemoryCredentialStore;

    const PRIVATE_KEY: &[u8] = include_bytes!("../../../../keys/ec256-key-pri.pem");
    const PUBLIC_KEY: &[u8] = include_bytes!("../../../../keys/ec256-key-pub.pem");

    fn test_router() -> Router {
        let keys = Arc::new(StaticKeyProvider::new(PRIVATE_KEY, PUBLIC_KEY));
        let hasher = PasswordHasher::with_cost(HashCost {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        let authenticator = Arc::new(Authenticator::new(hasher, TokenIssuer::new(keys.clone())));
        let service = AuthenticationService::new(
            Arc::new(InMemoryCredentialStore::new()),
            authenticator,
        );

        create_router(
            Arc::new(service),
            Arc::new(AuthorizationGuard::new(TokenVerifier::new(keys))),
            Duration::from_secs(5),
        )
    }

    async fn body_json(response: Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::post(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_hello_route() {
        let response = test_router()
            .oneshot(Request::get("/hello").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["message"], "Hello World");
    }

    #[tokio::test]
    async fn test_protected_route_without_header() {
        let response = test_router()
            .oneshot(Request::get("/authorized_hello").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["data"]["message"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_protected_route_with_login_token() {
        let router = test_router();
        let credentials = serde_json::json!({ "username": "bob", "password": "pw1" });

        let response = router
            .clone()
            .oneshot(json_request("/registration", credentials.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = router
            .clone()
            .oneshot(json_request("/authentication", credentials))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let token = body_json(response).await["data"]["token"]
            .as_str()
            .unwrap()
            .to_string();

        let response = router
            .oneshot(
                Request::get("/authorized_hello")
                    .header(AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["message"], "Hello bob");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = test_router()
            .oneshot(Request::get("/admin").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
