use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::auth::{hash_password, Role};
use crate::config::SuperAdminSeed;
use crate::database::models::{AdminInput, User};
use crate::database::{DatabaseError, DbResult};

const USER_COLUMNS: &str = "id, nom, prenom, email, password_hash, numero, code, role, created_at, updated_at, deleted_at";

/// Users table access; admin operations only ever touch `AdminRestaurant` rows
#[derive(Clone)]
pub struct UserService {
    pool: SqlitePool,
}

impl UserService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Active user by email, used by login.
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ? AND deleted_at IS NULL"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn list_admins(&self) -> DbResult<Vec<User>> {
        let admins = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE role = ? AND deleted_at IS NULL ORDER BY id"
        ))
        .bind(Role::AdminRestaurant.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(admins)
    }

    pub async fn get_admin(&self, id: i64) -> DbResult<User> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ? AND role = ? AND deleted_at IS NULL"
        ))
        .bind(id)
        .bind(Role::AdminRestaurant.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("Admin {} not found", id)))
    }

    /// Insert an `AdminRestaurant`. The input must already be validated.
    pub async fn create_admin(&self, input: &AdminInput, password_hash: &str) -> DbResult<User> {
        self.insert(input, password_hash, Role::AdminRestaurant).await
    }

    /// Replace an admin's fields. `password_hash` of `None` keeps the stored one.
    pub async fn update_admin(
        &self,
        id: i64,
        input: &AdminInput,
        password_hash: Option<&str>,
    ) -> DbResult<User> {
        let result = sqlx::query(
            "UPDATE users SET nom = ?, prenom = ?, email = ?, numero = ?, code = ?, \
             password_hash = COALESCE(?, password_hash), role = ?, updated_at = ? \
             WHERE id = ? AND role = ? AND deleted_at IS NULL",
        )
        .bind(&input.nom)
        .bind(&input.prenom)
        .bind(&input.email)
        .bind(&input.numero)
        .bind(&input.code)
        .bind(password_hash)
        .bind(Role::AdminRestaurant.as_str())
        .bind(Utc::now())
        .bind(id)
        .bind(Role::AdminRestaurant.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_constraint(e, "Email"))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Admin {} not found", id)));
        }
        self.get_admin(id).await
    }

    pub async fn delete_admin(&self, id: i64) -> DbResult<()> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE users SET deleted_at = ?, updated_at = ? WHERE id = ? AND role = ? AND deleted_at IS NULL",
        )
        .bind(now)
        .bind(now)
        .bind(id)
        .bind(Role::AdminRestaurant.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Admin {} not found", id)));
        }
        Ok(())
    }

    async fn insert(&self, input: &AdminInput, password_hash: &str, role: Role) -> DbResult<User> {
        let now = Utc::now();
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (nom, prenom, email, password_hash, numero, code, role, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {USER_COLUMNS}"
        ))
        .bind(&input.nom)
        .bind(&input.prenom)
        .bind(&input.email)
        .bind(password_hash)
        .bind(&input.numero)
        .bind(&input.code)
        .bind(role.as_str())
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_constraint(e, "Email"))?;
        Ok(user)
    }
}

/// Create the configured super admin unless a live user already owns that email.
/// Returns whether a row was inserted.
pub async fn ensure_super_admin(pool: &SqlitePool, seed: &SuperAdminSeed) -> anyhow::Result<bool> {
    let users = UserService::new(pool.clone());
    if users.find_by_email(&seed.email).await?.is_some() {
        return Ok(false);
    }

    let hash = hash_password(&seed.password)?;
    let input = AdminInput {
        nom: "Super".to_string(),
        prenom: "Admin".to_string(),
        email: seed.email.clone(),
        password: String::new(),
        numero: "0000000000".to_string(),
        code: String::new(),
    };
    users.insert(&input, &hash, Role::SuperAdmin).await?;

    info!("Bootstrapped super admin account {}", seed.email);
    Ok(true)
}
