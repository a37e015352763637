use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use super::validation::ValidationError;
use super::RestaurantService;
use crate::database::models::{NewOrder, Order, OrderItem, OrderStatus, OrderWithItems};
use crate::database::{DatabaseError, DbResult};

const ORDER_COLUMNS: &str = "id, restaurant_id, total_amount, status, payment_id, created_at, updated_at";
const ITEM_COLUMNS: &str = "id, order_id, menu_id, quantity, price";

#[derive(Clone)]
pub struct OrderService {
    pool: SqlitePool,
}

/// Reject empty carts, bad quantities, bad prices and unknown statuses.
pub fn validate_order(input: &NewOrder) -> Result<OrderStatus, ValidationError> {
    if input.items.is_empty() {
        return Err(ValidationError::new("items", "An order needs at least one item"));
    }
    for item in &input.items {
        if item.quantity < 1 {
            return Err(ValidationError::new("items", "Quantity must be at least 1"));
        }
        if let Some(price) = item.price {
            if !price.is_finite() || price < 0.0 {
                return Err(ValidationError::new("items", "Price must be a non-negative number"));
            }
        }
    }

    match input.status.as_deref() {
        None | Some("") => Ok(OrderStatus::Pending),
        Some(status) => parse_status(status),
    }
}

pub fn parse_status(status: &str) -> Result<OrderStatus, ValidationError> {
    status.parse().map_err(|e: String| ValidationError::new("status", e))
}

impl OrderService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the order and its items atomically. Items without a price take
    /// the menu's price; the total is the sum of quantity times price.
    pub async fn create(&self, input: &NewOrder, status: OrderStatus) -> DbResult<OrderWithItems> {
        RestaurantService::new(self.pool.clone()).get(input.restaurant_id).await?;

        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        let mut priced = Vec::with_capacity(input.items.len());
        for item in &input.items {
            let menu_price: Option<(f64, i64)> =
                sqlx::query_as("SELECT price, restaurant_id FROM menus WHERE id = ?")
                    .bind(item.menu_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            let (menu_price, menu_restaurant) = menu_price.ok_or_else(|| {
                DatabaseError::InvalidReference(format!("Menu {} does not exist", item.menu_id))
            })?;
            if menu_restaurant != input.restaurant_id {
                return Err(DatabaseError::InvalidReference(format!(
                    "Menu {} does not belong to restaurant {}",
                    item.menu_id, input.restaurant_id
                )));
            }
            priced.push((item.menu_id, item.quantity, item.price.unwrap_or(menu_price)));
        }

        let total: f64 = priced.iter().map(|(_, qty, price)| *qty as f64 * price).sum();

        let order = sqlx::query_as::<_, Order>(&format!(
            "INSERT INTO orders (restaurant_id, total_amount, status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING {ORDER_COLUMNS}"
        ))
        .bind(input.restaurant_id)
        .bind(total)
        .bind(status.as_str())
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DatabaseError::from_constraint(e, "Order"))?;

        let mut items = Vec::with_capacity(priced.len());
        for (menu_id, quantity, price) in priced {
            let item = sqlx::query_as::<_, OrderItem>(&format!(
                "INSERT INTO order_items (order_id, menu_id, quantity, price) \
                 VALUES (?, ?, ?, ?) RETURNING {ITEM_COLUMNS}"
            ))
            .bind(order.id)
            .bind(menu_id)
            .bind(quantity)
            .bind(price)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| DatabaseError::from_constraint(e, "Order item"))?;
            items.push(item);
        }

        tx.commit().await?;
        debug!("Created order {} with {} items, total {}", order.id, items.len(), order.total_amount);

        Ok(OrderWithItems { order, items })
    }

    pub async fn get(&self, id: i64) -> DbResult<Order> {
        sqlx::query_as::<_, Order>(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Order {} not found", id)))
    }

    pub async fn list_for_restaurant(&self, restaurant_id: i64) -> DbResult<Vec<OrderWithItems>> {
        RestaurantService::new(self.pool.clone()).get(restaurant_id).await?;

        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE restaurant_id = ? ORDER BY id"
        ))
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;

        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT oi.id, oi.order_id, oi.menu_id, oi.quantity, oi.price FROM order_items oi \
             JOIN orders o ON o.id = oi.order_id WHERE o.restaurant_id = ? ORDER BY oi.id",
        )
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = items.iter().filter(|i| i.order_id == order.id).cloned().collect();
                OrderWithItems { order, items }
            })
            .collect())
    }

    pub async fn update_status(&self, id: i64, status: OrderStatus) -> DbResult<Order> {
        let result = sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Order {} not found", id)));
        }
        self.get(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{NewMenu, NewOrderItem, NewRestaurant};
    use crate::services::MenuService;
    use crate::testing::test_pool;

    async fn seed(pool: &SqlitePool) -> (i64, i64, i64) {
        let restaurant = RestaurantService::new(pool.clone())
            .create(&NewRestaurant { name: "Le Tassili".into(), ..Default::default() })
            .await
            .unwrap();
        let menus = MenuService::new(pool.clone());
        let a = menus
            .create(restaurant.id, &NewMenu { name: "Tajine".into(), description: String::new(), price: 800.0 })
            .await
            .unwrap();
        let b = menus
            .create(restaurant.id, &NewMenu { name: "The".into(), description: String::new(), price: 100.0 })
            .await
            .unwrap();
        (restaurant.id, a.id, b.id)
    }

    fn order(restaurant_id: i64, items: Vec<NewOrderItem>) -> NewOrder {
        NewOrder { restaurant_id, status: None, items }
    }

    #[test]
    fn validation_rules() {
        assert_eq!(validate_order(&order(1, vec![])).unwrap_err().field, "items");

        let zero = NewOrderItem { menu_id: 1, quantity: 0, price: None };
        assert_eq!(validate_order(&order(1, vec![zero])).unwrap_err().field, "items");

        let ok = NewOrderItem { menu_id: 1, quantity: 2, price: None };
        let mut input = order(1, vec![ok]);
        assert_eq!(validate_order(&input), Ok(OrderStatus::Pending));

        input.status = Some("shipped".into());
        assert_eq!(validate_order(&input).unwrap_err().field, "status");
    }

    #[tokio::test]
    async fn total_uses_menu_price_when_missing() {
        let pool = test_pool().await;
        let (restaurant_id, tajine, tea) = seed(&pool).await;
        let orders = OrderService::new(pool);

        let created = orders
            .create(
                &order(
                    restaurant_id,
                    vec![
                        NewOrderItem { menu_id: tajine, quantity: 2, price: None },
                        NewOrderItem { menu_id: tea, quantity: 3, price: Some(120.0) },
                    ],
                ),
                OrderStatus::Pending,
            )
            .await
            .unwrap();

        assert_eq!(created.items.len(), 2);
        assert_eq!(created.items[0].price, 800.0);
        assert_eq!(created.order.total_amount, 2.0 * 800.0 + 3.0 * 120.0);
        assert_eq!(created.order.status, "pending");

        let listed = orders.list_for_restaurant(restaurant_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].items.len(), 2);
    }

    #[tokio::test]
    async fn unknown_menu_rolls_back() {
        let pool = test_pool().await;
        let (restaurant_id, tajine, _) = seed(&pool).await;
        let orders = OrderService::new(pool.clone());

        let err = orders
            .create(
                &order(
                    restaurant_id,
                    vec![
                        NewOrderItem { menu_id: tajine, quantity: 1, price: None },
                        NewOrderItem { menu_id: 999, quantity: 1, price: None },
                    ],
                ),
                OrderStatus::Pending,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidReference(_)));

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders").fetch_one(&pool).await.unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn status_update() {
        let pool = test_pool().await;
        let (restaurant_id, tajine, _) = seed(&pool).await;
        let orders = OrderService::new(pool);
        let created = orders
            .create(
                &order(restaurant_id, vec![NewOrderItem { menu_id: tajine, quantity: 1, price: None }]),
                OrderStatus::Pending,
            )
            .await
            .unwrap();

        let updated = orders.update_status(created.order.id, OrderStatus::Preparing).await.unwrap();
        assert_eq!(updated.status, "preparing");
        assert!(matches!(
            orders.update_status(404, OrderStatus::Completed).await,
            Err(DatabaseError::NotFound(_))
        ));
    }
}
