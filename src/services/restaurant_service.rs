use chrono::Utc;
use sqlx::SqlitePool;

use super::validation::{strip_tags, ValidationError};
use crate::database::models::{NewRestaurant, Restaurant};
use crate::database::{DatabaseError, DbResult};

const RESTAURANT_COLUMNS: &str = "id, name, description, image, price, created_at, updated_at";

#[derive(Clone)]
pub struct RestaurantService {
    pool: SqlitePool,
}

impl RestaurantService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Trim the text fields and check name and price.
    pub fn prepare(input: NewRestaurant) -> Result<NewRestaurant, ValidationError> {
        let input = NewRestaurant {
            name: strip_tags(&input.name),
            description: strip_tags(&input.description),
            image: input.image.trim().to_string(),
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

    pub async fn list(&self) -> DbResult<Vec<Restaurant>> {
        let rows = sqlx::query_as::<_, Restaurant>(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE deleted_at IS NULL ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: i64) -> DbResult<Restaurant> {
        sqlx::query_as::<_, Restaurant>(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE id = ? AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("Restaurant {} not found", id)))
    }

    pub async fn create(&self, input: &NewRestaurant) -> DbResult<Restaurant> {
        let now = Utc::now();
        let restaurant = sqlx::query_as::<_, Restaurant>(&format!(
            "INSERT INTO restaurants (name, description, image, price, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING {RESTAURANT_COLUMNS}"
        ))
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.image)
        .bind(input.price)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(restaurant)
    }

    pub async fn update(&self, id: i64, input: &NewRestaurant) -> DbResult<Restaurant> {
        let result = sqlx::query(
            "UPDATE restaurants SET name = ?, description = ?, image = ?, price = ?, updated_at = ? \
             WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.image)
        .bind(input.price)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Restaurant {} not found", id)));
        }
        self.get(id).await
    }

    /// Soft delete
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE restaurants SET deleted_at = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(now)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Restaurant {} not found", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_pool;

    fn input(name: &str, price: f64) -> NewRestaurant {
        NewRestaurant {
            name: name.into(),
            description: "Couscous et grillades".into(),
            image: "https://img.example/1.png".into(),
            price,
        }
    }

    #[test]
    fn prepare_rejects_blank_name_and_negative_price() {
        assert_eq!(RestaurantService::prepare(input("  ", 10.0)).unwrap_err().field, "name");
        assert_eq!(RestaurantService::prepare(input("Ok", -1.0)).unwrap_err().field, "price");
        assert_eq!(RestaurantService::prepare(input(" <b>El Bahdja</b> ", 0.0)).unwrap().name, "El Bahdja");
    }

    #[tokio::test]
    async fn crud_with_soft_delete() {
        let service = RestaurantService::new(test_pool().await);

        let created = service.create(&input("El Bahdja", 1200.0)).await.unwrap();
        assert_eq!(service.list().await.unwrap().len(), 1);

        let updated = service.update(created.id, &input("El Bahdja 2", 1500.0)).await.unwrap();
        assert_eq!(updated.name, "El Bahdja 2");
        assert_eq!(updated.price, 1500.0);

        service.delete(created.id).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
        assert!(matches!(service.get(created.id).await, Err(DatabaseError::NotFound(_))));
        assert!(matches!(
            service.update(created.id, &input("x", 1.0)).await,
            Err(DatabaseError::NotFound(_))
        ));
    }
}
