//! Punch direction enum as the single source of truth for `IN`/`OUT` strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether an attendance event marks an arrival or a departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    /// String representation for database storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN" | "in" => Ok(Self::In),
            "OUT" | "out" => Ok(Self::Out),
            _ => Err(UnknownDirection(s.to_string())),
        }
    }
}

impl Serialize for Direction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown direction strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDirection(pub String);

impl fmt::Display for UnknownDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown direction: {}", self.0)
    }
}

impl std::error::Error for UnknownDirection {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_storage_and_lowercase_forms() {
        assert_eq!("IN".parse::<Direction>().unwrap(), Direction::In);
        assert_eq!("out".parse::<Direction>().unwrap(), Direction::Out);
        assert_eq!(Direction::Out.to_string(), "OUT");
    }

    #[test]
    fn unknown_direction_errors() {
        let err = "BREAK".parse::<Direction>().unwrap_err();
        assert_eq!(err.to_string(), "unknown direction: BREAK");
    }

    #[test]
    fn serializes_as_storage_string() {
        let json = serde_json::to_string(&Direction::In).unwrap();
        assert_eq!(json, r#""IN""#);
        let parsed: Direction = serde_json::from_str(r#""OUT""#).unwrap();
        assert_eq!(parsed, Direction::Out);
    }
}
