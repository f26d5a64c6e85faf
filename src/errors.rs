use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),

    #[error("AI provider error: {0}")]
    Ai(String),

    #[error("{0}")]
    InvalidInput(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Feasibility outcomes ("no room fits") are 200 replies composed
        // upstream; only user-correctable input reaches 4xx and only
        // system faults reach 5xx, with the detail kept in the logs.
        let (status, message) = match &self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Database(_) | AppError::Internal(_) | AppError::Ai(_) => {
                tracing::error!(error = %self, "advisor request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Xin lỗi, hệ thống đang gặp sự cố. Bạn thử lại sau ít phút nhé.".to_string(),
                )
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}
