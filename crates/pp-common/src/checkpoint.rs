//! Canonical checkpoints along a segmented pitch.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five points along a segmented pitch where joint positions are
/// sampled as features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Checkpoint {
    /// Leg lift, index 0 of the segment.
    Start,
    /// Index `floor(0.25 * N)`.
    Time25,
    /// Index `floor(0.5 * N)`.
    Time50,
    /// Index `floor(0.75 * N)`.
    Time75,
    /// Ball release, last index of the segment.
    Release,
}

impl Checkpoint {
    /// All checkpoints in feature-column order.
    pub const ALL: [Checkpoint; 5] = [
        Checkpoint::Start,
        Checkpoint::Time25,
        Checkpoint::Time50,
        Checkpoint::Time75,
        Checkpoint::Release,
    ];

    /// The interior percentile checkpoints assigned by the segmenter.
    pub const PERCENTILES: [Checkpoint; 3] =
        [Checkpoint::Time25, Checkpoint::Time50, Checkpoint::Time75];

    /// Suffix used in feature column names (`wrist_x_25`).
    pub fn suffix(self) -> &'static str {
        match self {
            Checkpoint::Start => "start",
            Checkpoint::Time25 => "25",
            Checkpoint::Time50 => "50",
            Checkpoint::Time75 => "75",
            Checkpoint::Release => "release",
        }
    }

    /// Name of the boolean flag column in processed tables.
    pub fn flag_column(self) -> &'static str {
        match self {
            Checkpoint::Start => "start",
            Checkpoint::Time25 => "time_25",
            Checkpoint::Time50 => "time_50",
            Checkpoint::Time75 => "time_75",
            Checkpoint::Release => "release",
        }
    }

    /// Fractional position within the segment for percentile checkpoints.
    pub fn fraction(self) -> Option<f64> {
        match self {
            Checkpoint::Time25 => Some(0.25),
            Checkpoint::Time50 => Some(0.5),
            Checkpoint::Time75 => Some(0.75),
            Checkpoint::Start | Checkpoint::Release => None,
        }
    }
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag_column())
    }
}
