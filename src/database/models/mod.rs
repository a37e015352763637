pub mod menu;
pub mod notification;
pub mod order;
pub mod payment;
pub mod restaurant;
pub mod user;

pub use menu::{Menu, NewMenu};
pub use notification::{NewNotification, Notification};
pub use order::{NewOrder, NewOrderItem, Order, OrderItem, OrderStatus, OrderWithItems};
pub use payment::{NewPayment, Payment, PaymentMethod, PaymentStatus};
pub use restaurant::{NewRestaurant, Restaurant};
pub use user::{AdminInput, User};
