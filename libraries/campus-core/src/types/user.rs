/// Staff user domain types
use crate::error::CampusError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub type UserId = i64;

/// Staff role. A display label only: no endpoint gates on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Admin")]
    Admin,
    #[serde(rename = "Teaching Staff")]
    TeachingStaff,
    #[serde(rename = "Non-Teaching Staff")]
    NonTeachingStaff,
}

impl Role {
    /// Convert to the stored string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::TeachingStaff => "Teaching Staff",
            Self::NonTeachingStaff => "Non-Teaching Staff",
        }
    }
}

impl FromStr for Role {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Self::Admin),
            "Teaching Staff" => Ok(Self::TeachingStaff),
            "Non-Teaching Staff" => Ok(Self::NonTeachingStaff),
            other => Err(CampusError::invalid_input(format!("unknown role: {}", other))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Staff account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,

    /// Unique login name
    pub username: String,

    pub full_name: String,

    pub role: Role,

    pub is_active: bool,

    /// Row creation time (UTC, as stored by the database)
    pub created_at: NaiveDateTime,
}

/// Data for creating a new user. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
}
