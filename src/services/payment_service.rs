use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::validation::ValidationError;
use crate::database::models::{NewPayment, Payment, PaymentMethod, PaymentStatus};
use crate::database::{DatabaseError, DbResult};

const PAYMENT_COLUMNS: &str = "id, order_id, amount, method, status, reference, created_at, updated_at";

#[derive(Clone)]
pub struct PaymentService {
    pool: SqlitePool,
}

/// Checked payment ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentDraft {
    pub order_id: i64,
    pub amount: f64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub reference: String,
}

impl PaymentDraft {
    pub fn from_input(input: NewPayment) -> Result<Self, ValidationError> {
        if !input.amount.is_finite() || input.amount < 0.0 {
            return Err(ValidationError::new("amount", "Amount must be a non-negative number"));
        }
        let method = input
            .method
            .trim()
            .parse()
            .map_err(|e: String| ValidationError::new("method", e))?;
        let status = match input.status.as_deref().map(str::trim) {
            None | Some("") => PaymentStatus::Pending,
            Some(s) => s.parse().map_err(|e: String| ValidationError::new("status", e))?,
        };
        let reference = input
            .reference
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Ok(Self {
            order_id: input.order_id,
            amount: input.amount,
            method,
            status,
            reference,
        })
    }
}

impl PaymentService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record the payment and point its order at it.
    pub async fn create(&self, draft: &PaymentDraft) -> DbResult<Payment> {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        let payment = sqlx::query_as::<_, Payment>(&format!(
            "INSERT INTO payments (order_id, amount, method, status, reference, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {PAYMENT_COLUMNS}"
        ))
        .bind(draft.order_id)
        .bind(draft.amount)
        .bind(draft.method.as_str())
        .bind(draft.status.as_str())
        .bind(&draft.reference)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DatabaseError::from_constraint(e, "Payment"))?;

        sqlx::query("UPDATE orders SET payment_id = ?, updated_at = ? WHERE id = ?")
            .bind(payment.id)
            .bind(now)
            .bind(draft.order_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(payment)
    }

    /// Most recent payment recorded for the order.
    pub async fn find_by_order(&self, order_id: i64) -> DbResult<Payment> {
        sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE order_id = ? ORDER BY id DESC LIMIT 1"
        ))
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("No payment for order {}", order_id)))
    }
}
