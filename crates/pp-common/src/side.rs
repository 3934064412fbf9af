//! Handedness of pitchers and batters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Left or right side of the body.
///
/// Capture files encode throwing and batting sides as `"L"`/`"R"`; joint
/// names carry the same information as a lower-case prefix (`lKnee`, `rWrist`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "L", alias = "l", alias = "left")]
    Left,
    #[serde(rename = "R", alias = "r", alias = "right")]
    Right,
}

impl Side {
    /// The opposite side. The front leg of a pitcher is opposite the throwing arm.
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Prefix used on joint names for this side.
    pub fn joint_prefix(self) -> char {
        match self {
            Side::Left => 'l',
            Side::Right => 'r',
        }
    }

    /// Single-letter code used in capture files.
    pub fn code(self) -> &'static str {
        match self {
            Side::Left => "L",
            Side::Right => "R",
        }
    }

    /// Side-prefixed joint name, e.g. `Side::Left.joint("Knee") == "lKnee"`.
    pub fn joint(self, base: &str) -> String {
        format!("{}{}", self.joint_prefix(), base)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a side code is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised side code: {0:?}")]
pub struct ParseSideError(pub String);

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "left" => Ok(Side::Left),
            "r" | "right" => Ok(Side::Right),
            _ => Err(ParseSideError(s.to_string())),
        }
    }
}
