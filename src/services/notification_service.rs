use chrono::Utc;
use sqlx::SqlitePool;

use super::validation::{strip_tags, ValidationError};
use crate::database::models::{NewNotification, Notification};
use crate::database::{DatabaseError, DbResult};

const NOTIFICATION_COLUMNS: &str = "id, commentaire_id, message, is_read, created_at";

pub const MAX_MESSAGE_LEN: usize = 2000;

#[derive(Clone)]
pub struct NotificationService {
    pool: SqlitePool,
}

impl NotificationService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn prepare(input: NewNotification) -> Result<NewNotification, ValidationError> {
        let message = strip_tags(&input.message);
        if message.is_empty() {
            return Err(ValidationError::new("message", "This field is required"));
        }
        if message.chars().count() > MAX_MESSAGE_LEN {
            return Err(ValidationError::new(
                "message",
                format!("Message must be at most {} characters", MAX_MESSAGE_LEN),
            ));
        }
        Ok(NewNotification { message, ..input })
    }

    /// Newest first
    pub async fn list(&self) -> DbResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, Notification>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: i64) -> DbResult<Notification> {
        sqlx::query_as::<_, Notification>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("Notification {} not found", id)))
    }

    pub async fn create(&self, input: &NewNotification) -> DbResult<Notification> {
        let notification = sqlx::query_as::<_, Notification>(&format!(
            "INSERT INTO notifications (commentaire_id, message, is_read, created_at) \
             VALUES (?, ?, ?, ?) RETURNING {NOTIFICATION_COLUMNS}"
        ))
        .bind(input.commentaire_id.unwrap_or(0))
        .bind(&input.message)
        .bind(input.is_read.unwrap_or(false))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(notification)
    }

    pub async fn update(&self, id: i64, input: &NewNotification) -> DbResult<Notification> {
        let result = sqlx::query(
            "UPDATE notifications SET message = ?, commentaire_id = COALESCE(?, commentaire_id), \
             is_read = COALESCE(?, is_read) WHERE id = ?",
        )
        .bind(&input.message)
        .bind(input.commentaire_id)
        .bind(input.is_read)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Notification {} not found", id)));
        }
        self.get(id).await
    }

    pub async fn mark_read(&self, id: i64) -> DbResult<Notification> {
        let result = sqlx::query("UPDATE notifications SET is_read = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Notification {} not found", id)));
        }
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Notification {} not found", id)));
        }
        Ok(())
    }
}
