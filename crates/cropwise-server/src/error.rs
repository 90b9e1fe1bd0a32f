use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use cropwise_core::error::CropwiseError;

const INTERNAL_MESSAGE: &str = "An error occurred processing your request";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CropwiseError),

    #[error("missing user identity")]
    Unauthorized,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Core(CropwiseError::Validation(issues)) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "error": "Invalid input parameters",
                    "details": issues,
                }),
            ),
            AppError::Core(CropwiseError::Upstream(reason)) => {
                tracing::error!("upstream failure: {}", reason);
                (
                    StatusCode::BAD_GATEWAY,
                    serde_json::json!({ "error": "Weather service unavailable" }),
                )
            }
            AppError::Core(other) => {
                tracing::error!("request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "error": INTERNAL_MESSAGE }),
                )
            }
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                serde_json::json!({ "error": "Sign in to view your history" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
