use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::services::advisor;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AdvisorRequest {
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct AdvisorReply {
    pub reply: String,
}

pub async fn advise(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AdvisorRequest>,
) -> Result<Json<AdvisorReply>, AppError> {
    let message = req.message.unwrap_or_default();
    let message = message.trim();

    if message.is_empty() {
        return Err(AppError::InvalidInput(
            "Bạn chưa nhập câu hỏi, mình chưa tư vấn được.".to_string(),
        ));
    }

    tracing::info!(message = %message, "incoming advisor request");

    let reply = advisor::answer(&state, message).await?;
    Ok(Json(AdvisorReply { reply }))
}
