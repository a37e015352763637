// handlers/mod.rs - Handlers grouped by access tier
//
// Public (no token) → Protected (valid token) → Elevated (SuperAdmin token)

pub mod elevated;
pub mod protected;
pub mod public;
