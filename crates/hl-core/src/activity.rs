//! Activity kind enum as the single source of truth for kind strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::ValidationError;

/// The three kinds of caregiver activity the log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActivityKind {
    Feed,
    Sleep,
    Diaper,
}

impl ActivityKind {
    /// String form used in event files and CLI flags.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Sleep => "sleep",
            Self::Diaper => "diaper",
        }
    }

    /// Whether events of this kind occupy a time interval rather than a point.
    #[must_use]
    pub const fn is_interval(&self) -> bool {
        matches!(self, Self::Sleep)
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "feed" | "milk" => Ok(Self::Feed),
            "sleep" => Ok(Self::Sleep),
            "diaper" => Ok(Self::Diaper),
            _ => Err(ValidationError::InvalidKind {
                value: s.to_string(),
            }),
        }
    }
}

impl Serialize for ActivityKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ActivityKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
