use axum::http::StatusCode;

use super::ApiSuccess;
use super::MessageData;

/// Public content, reachable without a token.
pub async fn hello() -> ApiSuccess<MessageData> {
    ApiSuccess::new(
        StatusCode::OK,
        MessageData {
            message: "Hello World".to_string(),
        },
    )
}
