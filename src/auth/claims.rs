use serde::{Deserialize, Serialize};

use super::Role;

/// JWT payload. Only the fields this service reads or writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Missing in foreign tokens is tolerated; the identity then has an empty role
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// User id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default)]
    pub iat: i64,
    pub exp: i64,
}

/// Authenticated caller, attached to the request by the request gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub role: String,
    pub username: Option<String>,
    pub user_id: Option<String>,
}

impl Identity {
    /// The role claim as a known role, if it is one.
    pub fn known_role(&self) -> Option<Role> {
        self.role.parse().ok()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role.as_str()
    }
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            role: claims.role,
            username: claims.username,
            user_id: claims.sub,
        }
    }
}
