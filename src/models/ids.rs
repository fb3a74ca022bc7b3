//! Strongly-typed ID wrappers for expenses and events
//!
//! Both entity kinds are keyed by a random UUID generated once at creation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Whether `reference` names this ID
            ///
            /// Accepts the full UUID, the short display form (`exp-1a2b3c4d`)
            /// or a bare UUID prefix of at least four characters.
            pub fn matches_ref(&self, reference: &str) -> bool {
                let reference = reference.trim().to_ascii_lowercase();
                let bare = reference
                    .strip_prefix($display_prefix)
                    .unwrap_or(&reference);
                bare.len() >= 4 && self.0.to_string().starts_with(bare)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(ExpenseId, "exp-");
define_id!(EventId, "evt-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = ExpenseId::new();
        let display = id.to_string();
        assert!(display.starts_with("exp-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_matches_short_reference() {
        let id = ExpenseId::new();
        assert!(id.matches_ref(&id.to_string()));
        assert!(id.matches_ref(&id.as_uuid().to_string()));
        assert!(!id.matches_ref("exp-"));

        let fixed = ExpenseId::from(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap());
        assert!(fixed.matches_ref("exp-550e8400"));
        assert!(fixed.matches_ref("550E"));
        assert!(!fixed.matches_ref("exp-660e8400"));
    }

    #[test]
    fn test_parse_with_prefix() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: EventId = format!("evt-{}", uuid_str).parse().unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);
    }

    #[test]
    fn test_id_serialization() {
        let id = EventId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: EventId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
