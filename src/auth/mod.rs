//! Authentication core.
//!
//! Tokens are HS256 JWTs carrying a role claim and a 24h expiry. They travel
//! in the `auth_token` cookie only; the `Authorization` header is not read.
//!
//! 1. `POST /login` verifies email + password (argon2) and calls [`TokenIssuer`]
//! 2. The token is set as an http-only, same-site=lax cookie
//! 3. The request gate ([`crate::middleware::request_gate`]) verifies it with
//!    [`TokenVerifier`] and attaches an [`Identity`] to the request
//! 4. Role-gated route groups compare `Identity::role` with the required [`Role`]
//!
//! Revocation is stateless: logout only clears the client cookie, so a copied
//! token stays valid until its `exp`.

pub mod claims;
pub mod cookie;
pub mod error;
pub mod password;
pub mod role;
pub mod token;

pub use claims::{Claims, Identity};
pub use cookie::{token_from_headers, CookiePolicy, AUTH_COOKIE_NAME};
pub use error::AuthError;
pub use password::{hash_password, verify_password};
pub use role::Role;
pub use token::{IssuedToken, Subject, TokenIssuer, TokenVerifier};
