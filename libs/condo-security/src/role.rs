use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role carried by an authenticated principal.
///
/// Wire names follow the profile table of the hosted store
/// (`admin`, `residente`, `proveedor`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "residente")]
    Resident,
    #[serde(rename = "proveedor")]
    Provider,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Resident, Role::Provider];

    /// Wire name of the role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Resident => "residente",
            Self::Provider => "proveedor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: '{0}'")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    /// Accepts the wire names and their English aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "residente" | "resident" => Ok(Self::Resident),
            "proveedor" | "provider" => Ok(Self::Provider),
            _ => Err(ParseRoleError(s.to_owned())),
        }
    }
}
