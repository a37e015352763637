// handlers/elevated/restaurants.rs - /SuperAdmin/restaurants

use axum::extract::State;

use crate::database::models::{NewRestaurant, Restaurant};
use crate::extract::{Json, Path};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::RestaurantService;
use crate::state::AppState;

pub async fn restaurant_list(State(state): State<AppState>) -> ApiResult<Vec<Restaurant>> {
    let restaurants = RestaurantService::new(state.pool).list().await?;
    Ok(ApiResponse::success(restaurants))
}

pub async fn restaurant_show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Restaurant> {
    let restaurant = RestaurantService::new(state.pool).get(id).await?;
    Ok(ApiResponse::success(restaurant))
}

pub async fn restaurant_create(
    State(state): State<AppState>,
    Json(body): Json<NewRestaurant>,
) -> ApiResult<Restaurant> {
    let input = RestaurantService::prepare(body)?;
    let restaurant = RestaurantService::new(state.pool).create(&input).await?;
    tracing::info!("Created restaurant {} ({})", restaurant.id, restaurant.name);
    Ok(ApiResponse::created(restaurant))
}

pub async fn restaurant_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<NewRestaurant>,
) -> ApiResult<Restaurant> {
    let input = RestaurantService::prepare(body)?;
    let restaurant = RestaurantService::new(state.pool).update(id, &input).await?;
    Ok(ApiResponse::success(restaurant))
}

/// Soft delete
pub async fn restaurant_delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<()> {
    RestaurantService::new(state.pool).delete(id).await?;
    tracing::info!("Deleted restaurant {}", id);
    Ok(ApiResponse::no_content())
}
