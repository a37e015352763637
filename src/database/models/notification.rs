use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Notification {
    pub id: i64,
    pub commentaire_id: i64,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewNotification {
    #[serde(default)]
    pub commentaire_id: Option<i64>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub is_read: Option<bool>,
}
