// handlers/protected/payments.rs - POST /payments, GET /orders/:order_id/payment

use axum::extract::State;

use crate::database::models::{NewPayment, Payment};
use crate::extract::{Json, Path};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{PaymentDraft, PaymentService};
use crate::state::AppState;

pub async fn payment_create(
    State(state): State<AppState>,
    Json(body): Json<NewPayment>,
) -> ApiResult<Payment> {
    let draft = PaymentDraft::from_input(body)?;
    let payment = PaymentService::new(state.pool).create(&draft).await?;
    tracing::info!("Recorded {} payment {} for order {}", payment.method, payment.id, payment.order_id);
    Ok(ApiResponse::created(payment))
}

pub async fn payment_for_order(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> ApiResult<Payment> {
    let payment = PaymentService::new(state.pool).find_by_order(order_id).await?;
    Ok(ApiResponse::success(payment))
}
