use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::Role;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub nom: String,
    pub prenom: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub numero: String,
    pub code: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Stored role, unknown values read as `User`.
    pub fn role(&self) -> Role {
        Role::sanitize(&self.role)
    }
}

/// Body of admin create / update requests
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminInput {
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub prenom: String,
    #[serde(default)]
    pub email: String,
    /// Optional on update: an empty password keeps the stored hash
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub numero: String,
    #[serde(default)]
    pub code: String,
}
