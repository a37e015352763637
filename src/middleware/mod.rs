pub mod auth;
pub mod require_role;
pub mod response;

pub use auth::{is_public_path, request_gate};
pub use require_role::require_role;
pub use response::{ApiResponse, ApiResult};
