use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::credential::models::LoginCommand;
use crate::credential::models::Username;
use crate::credential::ports::AuthenticationServicePort;
use crate::inbound::http::router::AppState;

pub async fn authenticate(
    State(state): State<AppState>,
    Json(body): Json<AuthenticateRequestBody>,
) -> Result<ApiSuccess<AuthenticateResponseData>, ApiError> {
    // A username that could never have been registered fails like any other login.
    let username = Username::new(body.username).map_err(|_| ApiError::authentication_failed())?;

    let token = state
        .authentication_service
        .login(LoginCommand::new(username, body.password))
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthenticateResponseData {
            token: token.token,
            token_type: "Bearer".to_string(),
            expires_at: token.expires_at,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticateResponseData {
    pub token: String,
    pub token_type: String,
    /// Unix timestamp
    pub expires_at: i64,
}
