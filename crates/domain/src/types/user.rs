//! User account types

use serde::{Deserialize, Serialize};

use crate::errors::SolveTrackError;

/// Role held by a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Admin => "admin",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = SolveTrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            "admin" => Ok(Role::Admin),
            other => Err(SolveTrackError::InvalidInput(format!("unknown role: {other}"))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User account stored in the local database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Argon2 hash; never serialized into API responses
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    /// Cohort label, students only
    pub batch: Option<String>,
    /// Teacher user id, students only
    pub assigned_teacher: Option<String>,
    /// Students and teachers require admin approval before use
    pub is_approved: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in [Role::Student, Role::Teacher, Role::Admin] {
            assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(Role::from_str("superuser").is_err());
    }
}
