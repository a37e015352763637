use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Menu {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub restaurant_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Menu body; the restaurant comes from the path
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewMenu {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
}
