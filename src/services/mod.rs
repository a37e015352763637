pub mod menu_service;
pub mod notification_service;
pub mod order_service;
pub mod payment_service;
pub mod restaurant_service;
pub mod user_service;
pub mod validation;

pub use menu_service::MenuService;
pub use notification_service::NotificationService;
pub use order_service::OrderService;
pub use payment_service::{PaymentDraft, PaymentService};
pub use restaurant_service::RestaurantService;
pub use user_service::{ensure_super_admin, UserService};
pub use validation::ValidationError;
