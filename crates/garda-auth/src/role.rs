//! Role identifiers.
//!
//! The role claim is a closed set. An unrecognized spelling parses to no
//! role at all, and everything downstream of "no role" fails closed: hidden
//! menus stay empty, locked menus stay locked.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A closed-set role identifier carried in the session claims.
///
/// # Example
///
/// ```
/// use garda_auth::Role;
///
/// let role: Role = "SuperAdmin".parse().expect("known role");
/// assert_eq!(role, Role::SuperAdmin);
/// assert!("Operator".parse::<Role>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full administrative access, including admin-account management.
    SuperAdmin,
    /// Day-to-day dashboard operations.
    Admin,
    /// Kiosk-side guard client.
    Client,
}

impl Role {
    /// Every member of the closed set.
    pub const ALL: [Role; 3] = [Role::SuperAdmin, Role::Admin, Role::Client];

    /// Canonical claim-string spelling of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "SuperAdmin",
            Self::Admin => "Admin",
            Self::Client => "Client",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A claim string that names no known role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SuperAdmin" => Ok(Self::SuperAdmin),
            "Admin" => Ok(Self::Admin),
            "Client" => Ok(Self::Client),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_canonical_spelling() {
        for role in Role::ALL {
            let parsed: Role = role.as_str().parse().expect("canonical spelling should parse");
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn unknown_spelling_is_rejected() {
        let err = "superadmin".parse::<Role>().expect_err("case matters");
        assert!(err.to_string().contains("superadmin"));
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn serde_uses_claim_spelling() {
        let json = serde_json::to_string(&Role::SuperAdmin).expect("should serialize");
        assert_eq!(json, "\"SuperAdmin\"");
        let back: Role = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(back, Role::SuperAdmin);
    }
}
