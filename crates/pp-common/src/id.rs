//! Pitch, schedule, and pitcher identity types.
//!
//! Identifiers arrive from capture files as integers (sometimes stored as
//! floats); they are normalized to `i64` newtypes so a pitch id can never be
//! confused with a pitcher id.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a single pitch within a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PitchId(pub i64);

/// Identifier of the game schedule entry the pitch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleId(pub i64);

/// Identifier of the pitcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PitcherId(pub i64);

macro_rules! impl_id {
    ($name:ident) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                $name(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

impl_id!(PitchId);
impl_id!(ScheduleId);
impl_id!(PitcherId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_display_as_plain_integers() {
        assert_eq!(PitchId(42).to_string(), "42");
        assert_eq!(ScheduleId(-1).to_string(), "-1");
        assert_eq!(PitcherId::from(7).to_string(), "7");
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let json = serde_json::to_string(&PitchId(123)).unwrap();
        assert_eq!(json, "123");
        let back: PitchId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PitchId(123));
    }
}
