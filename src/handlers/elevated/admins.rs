// handlers/elevated/admins.rs - /SuperAdmin/admins
//
// Admins are users with role AdminRestaurant. Input is trimmed and stripped of
// HTML before validation; the password is hashed here, never stored as given.

use axum::extract::State;

use crate::auth::hash_password;
use crate::database::models::{AdminInput, User};
use crate::extract::{Json, Path};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::UserService;
use crate::services::validation::{sanitize_admin, validate_admin};
use crate::state::AppState;

pub async fn admin_list(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let admins = UserService::new(state.pool).list_admins().await?;
    Ok(ApiResponse::success(admins))
}

pub async fn admin_show(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<User> {
    let admin = UserService::new(state.pool).get_admin(id).await?;
    Ok(ApiResponse::success(admin))
}

pub async fn admin_create(
    State(state): State<AppState>,
    Json(body): Json<AdminInput>,
) -> ApiResult<User> {
    let input = normalize(body);
    validate_admin(&input, true)?;

    let hash = hash_password(&input.password)?;
    let admin = UserService::new(state.pool).create_admin(&input, &hash).await?;
    tracing::info!("Created admin {} ({})", admin.id, admin.email);
    Ok(ApiResponse::created(admin))
}

/// Empty password keeps the current one
pub async fn admin_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<AdminInput>,
) -> ApiResult<User> {
    let input = normalize(body);
    validate_admin(&input, false)?;

    let hash = if input.password.is_empty() {
        None
    } else {
        Some(hash_password(&input.password)?)
    };
    let admin = UserService::new(state.pool)
        .update_admin(id, &input, hash.as_deref())
        .await?;
    Ok(ApiResponse::success(admin))
}

pub async fn admin_delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<()> {
    UserService::new(state.pool).delete_admin(id).await?;
    tracing::info!("Deleted admin {}", id);
    Ok(ApiResponse::no_content())
}

fn normalize(body: AdminInput) -> AdminInput {
    let mut input = sanitize_admin(body);
    input.email = input.email.to_lowercase();
    input
}
