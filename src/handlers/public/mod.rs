// handlers/public/mod.rs - Endpoints on the request gate's allow-list
//
// These never see an Identity; the gate does not inspect the cookie here.

pub mod auth;
pub mod submit;
pub mod system;

pub use auth::{login, logout};
pub use submit::submit;
pub use system::{docs, health, root};
