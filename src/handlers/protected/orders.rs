// handlers/protected/orders.rs - order creation, listing and status

use axum::extract::State;
use serde::Deserialize;

use crate::database::models::{NewOrder, Order, OrderWithItems};
use crate::extract::{Json, Path};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::OrderService;
use crate::services::order_service::{parse_status, validate_order};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    #[serde(default)]
    pub status: String,
}

/// GET /restaurants/:restaurant_id/orders
pub async fn order_list(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i64>,
) -> ApiResult<Vec<OrderWithItems>> {
    let orders = OrderService::new(state.pool).list_for_restaurant(restaurant_id).await?;
    Ok(ApiResponse::success(orders))
}

/// POST /orders
pub async fn order_create(
    State(state): State<AppState>,
    Json(body): Json<NewOrder>,
) -> ApiResult<OrderWithItems> {
    let status = validate_order(&body)?;
    let order = OrderService::new(state.pool).create(&body, status).await?;
    Ok(ApiResponse::created(order))
}

/// PUT /orders/:order_id/status
pub async fn order_status_update(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
    Json(body): Json<StatusUpdate>,
) -> ApiResult<Order> {
    let status = parse_status(body.status.trim())?;
    let order = OrderService::new(state.pool).update_status(order_id, status).await?;
    Ok(ApiResponse::success(order))
}
