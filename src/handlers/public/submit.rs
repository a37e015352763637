// handlers/public/submit.rs - POST /submit

use axum::extract::State;
use serde::Deserialize;

use crate::database::models::{NewNotification, Notification};
use crate::extract::Json;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::NotificationService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub commentaire_id: Option<i64>,
}

/// Anonymous message, stored as an unread notification for the super admin.
pub async fn submit(
    State(state): State<AppState>,
    Json(body): Json<SubmitRequest>,
) -> ApiResult<Notification> {
    let input = NotificationService::prepare(NewNotification {
        commentaire_id: body.commentaire_id,
        message: body.message,
        is_read: Some(false),
    })?;

    let notification = NotificationService::new(state.pool).create(&input).await?;
    Ok(ApiResponse::created(notification))
}
