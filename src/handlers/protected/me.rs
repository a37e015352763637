// handlers/protected/me.rs - GET /me

use axum::Extension;

use crate::auth::Identity;
use crate::middleware::{ApiResponse, ApiResult};

/// Echo the identity the request gate attached.
pub async fn me(Extension(identity): Extension<Identity>) -> ApiResult<Identity> {
    Ok(ApiResponse::success(identity))
}
