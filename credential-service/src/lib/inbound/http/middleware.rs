use auth::AuthorizationError;
use auth::TokenRejection;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated subject in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
}

/// Middleware that authorizes the bearer token and adds the subject to request extensions
///
/// Every rejection produces the same 401 response; the reason is only logged.
pub async fn authorize(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // A missing or non-ASCII header is handed on as empty and rejected by the guard.
    let header_value = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let claims = state
        .authorization_guard
        .authorize(header_value)
        .map_err(|e| {
            if is_infrastructure_failure(&e) {
                tracing::error!(reason = %e, "Request could not be authorized");
            } else {
                tracing::warn!(reason = %e, "Request not authorized");
            }
            ApiError::unauthorized()
        })?;

    req.extensions_mut().insert(AuthenticatedUser {
        username: claims.subject,
    });

    Ok(next.run(req).await)
}

/// Rejections caused by the server rather than by the presented credentials.
fn is_infrastructure_failure(error: &AuthorizationError) -> bool {
    matches!(
        error,
        AuthorizationError::Token(TokenRejection::KeyUnavailable(_))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_unavailable_is_infrastructure_failure() {
        let error = AuthorizationError::Token(TokenRejection::KeyUnavailable(
            "verification key file missing".to_string(),
        ));

        assert!(is_infrastructure_failure(&error));
    }

    #[test]
    fn test_caller_rejections_are_not_infrastructure_failures() {
        let caller_errors = [
            AuthorizationError::InvalidHeader,
            AuthorizationError::Token(TokenRejection::Malformed("two segments".to_string())),
            AuthorizationError::Token(TokenRejection::BadSignature),
            AuthorizationError::Token(TokenRejection::Expired),
        ];

        for error in &caller_errors {
            assert!(!is_infrastructure_failure(error), "{:?}", error);
        }
    }
}
