//! Well-known role names and the [`Role`] enum.
//!
//! Role names are stored verbatim in `users.role` and must match the CHECK
//! constraint in `20250101000001_create_users.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ACTOR: &str = "Actor";
pub const ROLE_PRODUCER: &str = "Producer";
pub const ROLE_ADMIN: &str = "Admin";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ACTOR, ROLE_PRODUCER, ROLE_ADMIN];

/// A user's role on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Actor,
    Producer,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Actor => ROLE_ACTOR,
            Role::Producer => ROLE_PRODUCER,
            Role::Admin => ROLE_ADMIN,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ACTOR => Ok(Role::Actor),
            ROLE_PRODUCER => Ok(Role::Producer),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(CoreError::Validation(format!(
                "Invalid role '{other}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }
}
