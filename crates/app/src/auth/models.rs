//! Auth data models.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::domain::users::models::UserUuid;

/// Staff role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    Cashier,
    Staff,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Cashier => "cashier",
            Self::Staff => "staff",
        }
    }

    /// Whether this role may use an area of the application.
    #[must_use]
    pub const fn can_access(self, area: Area) -> bool {
        match area {
            Area::BackOffice => matches!(self, Self::Admin),
            Area::Till => matches!(self, Self::Admin | Self::Cashier),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "cashier" => Ok(Self::Cashier),
            "staff" => Ok(Self::Staff),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Part of the application guarded by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    /// Catalog, inventory, orders, customers, staff, suppliers, reports and settings.
    BackOffice,

    /// Point of sale, transactions, returns and customer lookup.
    Till,
}

/// The signed-in staff member behind a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthUser {
    pub uuid: UserUuid,
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// Login result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub user: AuthUser,
    pub expires_at: Timestamp,
}

/// Server-side session state. Only a digest of the token is kept.
#[derive(Debug, Clone)]
pub(crate) struct SessionRecord {
    pub user: UserUuid,
    pub token_digest: [u8; 32],
    pub expires_at: Timestamp,
}

/// Login credential for a staff member.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credential {
    pub user: UserUuid,

    /// Hex SHA-256 digest of the password
    pub password_digest: String,
}
