//! User Models

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};

use crate::{auth::Role, uuids::TypedUuid};

/// User UUID
pub type UserUuid = TypedUuid<User>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

/// Staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,

    #[serde(default)]
    pub last_active: Option<Timestamp>,

    pub join_date: Date,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// New User Model
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,

    #[serde(default)]
    pub status: UserStatus,
}

/// User Update Model
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Matched against name and email
    pub search: Option<String>,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
}
