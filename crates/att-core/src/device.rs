//! Boundary types for the biometric time-clock.
//!
//! The device itself is reached through a [`DeviceGateway`]; this module only
//! fixes the shape of what a gateway hands back and how raw status codes map
//! onto punch directions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::direction::Direction;

/// Status codes the device uses for check-in.
const CHECK_IN_CODES: [u8; 2] = [0, 15];
/// Status code the device uses for check-out.
const CHECK_OUT_CODE: u8 = 1;

/// Name used when the device has no name on file for a user.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Errors raised while talking to a device.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The device (or its dump) could not be read.
    #[error("device unavailable: {0}")]
    Unavailable(#[source] std::io::Error),
    /// A record could not be decoded.
    #[error("invalid {kind} record at line {line}: {message}")]
    InvalidRecord {
        kind: &'static str,
        line: usize,
        message: String,
    },
}

/// One punch as read from the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Enrolled user identifier; matches an employee's external code.
    pub user_id: String,
    /// Punch time in the device's local wall clock, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    /// Raw device status code.
    pub status: u8,
}

impl DeviceRecord {
    /// Maps the raw status code to a direction.
    ///
    /// `0` and `15` are check-ins and `1` is a check-out. Any other code is
    /// treated as a check-in.
    pub fn direction(&self) -> Direction {
        direction_for_status(self.status)
    }
}

/// Maps a raw device status code to a direction.
pub fn direction_for_status(status: u8) -> Direction {
    if status == CHECK_OUT_CODE {
        return Direction::Out;
    }
    if !CHECK_IN_CODES.contains(&status) {
        tracing::warn!(status, "unknown device status code, treating as IN");
    }
    Direction::In
}

/// A user enrolled on the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceUser {
    pub user_id: String,
    #[serde(default)]
    pub name: String,
}

impl DeviceUser {
    /// Splits the device name into (given name, family name).
    ///
    /// The first word is the given name and the rest the family name. A
    /// single word is used for both; an empty name becomes [`UNKNOWN_NAME`].
    pub fn split_name(&self) -> (String, String) {
        let mut words = self.name.split_whitespace();
        let Some(first) = words.next() else {
            return (UNKNOWN_NAME.to_string(), UNKNOWN_NAME.to_string());
        };
        let rest: Vec<&str> = words.collect();
        if rest.is_empty() {
            (first.to_string(), first.to_string())
        } else {
            (first.to_string(), rest.join(" "))
        }
    }
}

/// Source of users and punches.
///
/// Implemented by whatever binds the vendor SDK (or reads its exports).
pub trait DeviceGateway {
    /// Users currently enrolled on the device.
    fn users(&mut self) -> Result<Vec<DeviceUser>, DeviceError>;

    /// Every punch stored on the device.
    fn attendance(&mut self) -> Result<Vec<DeviceRecord>, DeviceError>;
}
