//! User roles for authorization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Role carried in the token's `role` claim.
///
/// - `SuperAdmin` - platform operator, the only role admitted under `/SuperAdmin`
/// - `AdminRestaurant` - manages a restaurant
/// - `User` - ordinary customer
///
/// There is no hierarchy: a route group admits exactly one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    SuperAdmin,
    AdminRestaurant,
    User,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role '{0}' (expected SuperAdmin, AdminRestaurant or User)")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 3] = [Role::SuperAdmin, Role::AdminRestaurant, Role::User];

    /// Wire name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SuperAdmin",
            Role::AdminRestaurant => "AdminRestaurant",
            Role::User => "User",
        }
    }

    /// Map a stored role to a known one, falling back to `User`.
    pub fn sanitize(value: &str) -> Role {
        value.parse().unwrap_or(Role::User)
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_names_only() {
        assert_eq!("SuperAdmin".parse::<Role>(), Ok(Role::SuperAdmin));
        assert_eq!("AdminRestaurant".parse::<Role>(), Ok(Role::AdminRestaurant));
        assert_eq!("User".parse::<Role>(), Ok(Role::User));
        assert!("superadmin".parse::<Role>().is_err());
        assert!("admin_restaurant".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn sanitize_defaults_to_user() {
        assert_eq!(Role::sanitize("SuperAdmin"), Role::SuperAdmin);
        assert_eq!(Role::sanitize("Enseignant"), Role::User);
    }

    #[test]
    fn serde_uses_wire_names() {
        assert_eq!(serde_json::to_string(&Role::AdminRestaurant).unwrap(), "\"AdminRestaurant\"");
        let role: Role = serde_json::from_str("\"SuperAdmin\"").unwrap();
        assert_eq!(role, Role::SuperAdmin);
        assert!(serde_json::from_str::<Role>("\"root\"").is_err());
    }
}
