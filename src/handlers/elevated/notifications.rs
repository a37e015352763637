// handlers/elevated/notifications.rs - /SuperAdmin/notifications

use axum::extract::State;

use crate::database::models::{NewNotification, Notification};
use crate::extract::{Json, Path};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::NotificationService;
use crate::state::AppState;

pub async fn notification_list(State(state): State<AppState>) -> ApiResult<Vec<Notification>> {
    let notifications = NotificationService::new(state.pool).list().await?;
    Ok(ApiResponse::success(notifications))
}

pub async fn notification_show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Notification> {
    let notification = NotificationService::new(state.pool).get(id).await?;
    Ok(ApiResponse::success(notification))
}

pub async fn notification_create(
    State(state): State<AppState>,
    Json(body): Json<NewNotification>,
) -> ApiResult<Notification> {
    let input = NotificationService::prepare(body)?;
    let notification = NotificationService::new(state.pool).create(&input).await?;
    Ok(ApiResponse::created(notification))
}

pub async fn notification_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<NewNotification>,
) -> ApiResult<Notification> {
    let input = NotificationService::prepare(body)?;
    let notification = NotificationService::new(state.pool).update(id, &input).await?;
    Ok(ApiResponse::success(notification))
}

/// PATCH /SuperAdmin/notifications/:id/read
pub async fn notification_mark_read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Notification> {
    let notification = NotificationService::new(state.pool).mark_read(id).await?;
    Ok(ApiResponse::success(notification))
}

pub async fn notification_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    NotificationService::new(state.pool).delete(id).await?;
    Ok(ApiResponse::no_content())
}
