//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Unrecognized activity kind string.
    #[error("invalid activity kind: {value}")]
    InvalidKind { value: String },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated event identifier.
    ///
    /// Event IDs must be non-empty. Uniqueness is the persistence layer's job;
    /// the layout engine only uses them as a stable tie-breaker.
    EventId, "event ID"
);

define_string_id!(
    /// A validated subject (profile) identifier.
    SubjectId, "subject ID"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_id_rejects_empty() {
        assert!(EventId::new("").is_err());
        assert!(EventId::new("   ").is_err());
        assert!(EventId::new("log-1").is_ok());
    }

    #[test]
    fn subject_id_rejects_empty() {
        let err = SubjectId::new("").unwrap_err();
        assert_eq!(err.to_string(), "subject ID cannot be empty");
    }

    #[test]
    fn event_id_serde_roundtrip() {
        let id = EventId::new("log-123").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"log-123\"");
        let parsed: EventId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn subject_id_serde_rejects_empty() {
        let result: Result<SubjectId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn ids_order_lexically() {
        let a = EventId::new("a").unwrap();
        let b = EventId::new("b").unwrap();
        assert!(a < b);
    }

    #[test]
    fn subject_id_as_ref() {
        let id = SubjectId::new("baby-1").unwrap();
        let s: &str = id.as_ref();
        assert_eq!(s, "baby-1");
    }
}
