//! Employee status values.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid employee status value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid employee status: {value}")]
pub struct InvalidStatus {
    pub value: String,
}

/// Whether an employee is still expected to punch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
}

impl EmployeeStatus {
    /// String representation for database storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EmployeeStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(InvalidStatus {
                value: s.to_string(),
            }),
        }
    }
}
