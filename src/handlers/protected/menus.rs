// handlers/protected/menus.rs - /restaurants/:restaurant_id/menus

use axum::extract::State;

use crate::database::models::{Menu, NewMenu};
use crate::extract::{Json, Path};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::MenuService;
use crate::state::AppState;

pub async fn menu_list(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i64>,
) -> ApiResult<Vec<Menu>> {
    let menus = MenuService::new(state.pool).list_for_restaurant(restaurant_id).await?;
    Ok(ApiResponse::success(menus))
}

pub async fn menu_create(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i64>,
    Json(body): Json<NewMenu>,
) -> ApiResult<Menu> {
    let input = MenuService::prepare(body)?;
    let menu = MenuService::new(state.pool).create(restaurant_id, &input).await?;
    Ok(ApiResponse::created(menu))
}
