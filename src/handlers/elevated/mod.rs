// handlers/elevated/mod.rs - /SuperAdmin/* endpoints
//
// Mounted behind `require_role(SuperAdmin)` in addition to the request gate.

pub mod admins;
pub mod notifications;
pub mod restaurants;

pub use admins::{admin_create, admin_delete, admin_list, admin_show, admin_update};
pub use notifications::{
    notification_create, notification_delete, notification_list, notification_mark_read,
    notification_show, notification_update,
};
pub use restaurants::{
    restaurant_create, restaurant_delete, restaurant_list, restaurant_show, restaurant_update,
};
