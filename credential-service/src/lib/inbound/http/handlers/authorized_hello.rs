use axum::http::StatusCode;
use axum::Extension;

use super::ApiSuccess;
use super::MessageData;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Content for authenticated callers only, greeting the token subject.
pub async fn authorized_hello(
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiSuccess<MessageData> {
    ApiSuccess::new(
        StatusCode::OK,
        MessageData {
            message: format!("Hello {}", user.username),
        },
    )
}
