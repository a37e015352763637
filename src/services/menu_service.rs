use chrono::Utc;
use sqlx::SqlitePool;

use super::validation::{strip_tags, ValidationError};
use super::RestaurantService;
use crate::database::models::{Menu, NewMenu};
use crate::database::{DatabaseError, DbResult};

const MENU_COLUMNS: &str = "id, name, description, price, restaurant_id, created_at, updated_at";

#[derive(Clone)]
pub struct MenuService {
    pool: SqlitePool,
}

impl MenuService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn prepare(input: NewMenu) -> Result<NewMenu, ValidationError> {
        let input = NewMenu {
            name: strip_tags(&input.name),
            description: strip_tags(&input.description),
            price: input.price,
        };

        if input.name.is_empty() {
            return Err(ValidationError::new("name", "This field is required"));
        }
        if !input.price.is_finite() || input.price < 0.0 {
            return Err(ValidationError::new("price", "Price must be a non-negative number"));
        }
        Ok(input)
    }

    /// Menus of a live restaurant. 404 if the restaurant is missing.
    pub async fn list_for_restaurant(&self, restaurant_id: i64) -> DbResult<Vec<Menu>> {
        RestaurantService::new(self.pool.clone()).get(restaurant_id).await?;

        let menus = sqlx::query_as::<_, Menu>(&format!(
            "SELECT {MENU_COLUMNS} FROM menus WHERE restaurant_id = ? ORDER BY id"
        ))
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(menus)
    }

    pub async fn get(&self, id: i64) -> DbResult<Menu> {
        sqlx::query_as::<_, Menu>(&format!("SELECT {MENU_COLUMNS} FROM menus WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Menu {} not found", id)))
    }

    pub async fn create(&self, restaurant_id: i64, input: &NewMenu) -> DbResult<Menu> {
        RestaurantService::new(self.pool.clone()).get(restaurant_id).await?;

        let now = Utc::now();
        let menu = sqlx::query_as::<_, Menu>(&format!(
            "INSERT INTO menus (name, description, price, restaurant_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING {MENU_COLUMNS}"
        ))
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(restaurant_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_constraint(e, "Menu"))?;
        Ok(menu)
    }
}
