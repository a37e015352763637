// handlers/protected/mod.rs - Endpoints that need a valid token, any role

pub mod me;
pub mod menus;
pub mod orders;
pub mod payments;

pub use me::me;
pub use menus::{menu_create, menu_list};
pub use orders::{order_create, order_list, order_status_update};
pub use payments::{payment_create, payment_for_order};
