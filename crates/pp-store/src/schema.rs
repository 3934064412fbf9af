//! Arrow schema definitions and table naming.

use arrow::datatypes::{DataType, Field, Schema};

pub const PITCH_ID: &str = "pitch_id";
pub const SCHEDULE_ID: &str = "schedule_id";
pub const PITCHER_ID: &str = "pitcher_id";
pub const BATTING_SIDE: &str = "batting_side";
pub const THROWING_SIDE: &str = "throwing_side";
pub const TIME: &str = "time";
pub const JOINT_TYPE_ID: &str = "joint_type_id";

/// Metadata key holding the JSON config snapshot of the producing run.
pub const CONFIG_SNAPSHOT_KEY: &str = "pitch_path.config";

/// Metadata key naming the table kind.
pub const TABLE_NAME_KEY: &str = "pitch_path.table";

/// Alternative column names accepted on input, as found in raw capture exports.
pub const INPUT_ALIASES: &[(&str, &str)] = &[
    (PITCH_ID, "astros_pitch_id"),
    (SCHEDULE_ID, "sched_id"),
    (BATTING_SIDE, "bats"),
    (THROWING_SIDE, "throws"),
];

/// Kinds of table this workspace writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableName {
    /// Segmented per-frame trajectories with checkpoint flags.
    Processed,
    /// One feature row per pitch.
    PitcherFeatures,
}

impl TableName {
    /// Subdirectory of the output root holding this table kind.
    pub fn dir_name(self) -> &'static str {
        match self {
            TableName::Processed => "processed",
            TableName::PitcherFeatures => "pitcher_features",
        }
    }
}

impl std::fmt::Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Schema of long-format trajectory captures: one row per
/// (pitch, timestamp, joint).
pub fn long_trajectory_schema() -> Schema {
    Schema::new(vec![
        Field::new(PITCH_ID, DataType::Int64, false),
        Field::new(SCHEDULE_ID, DataType::Int64, false),
        Field::new(PITCHER_ID, DataType::Int64, false),
        Field::new(BATTING_SIDE, DataType::Utf8, false),
        Field::new(THROWING_SIDE, DataType::Utf8, false),
        Field::new(TIME, DataType::Float64, false),
        Field::new(JOINT_TYPE_ID, DataType::Int64, false),
        Field::new("x", DataType::Float64, true),
        Field::new("y", DataType::Float64, true),
        Field::new("z", DataType::Float64, true),
    ])
}

/// Columns prefixing every per-frame table, in order.
pub fn frame_id_fields() -> Vec<Field> {
    vec![
        Field::new(PITCH_ID, DataType::Int64, false),
        Field::new(SCHEDULE_ID, DataType::Int64, false),
        Field::new(PITCHER_ID, DataType::Int64, false),
        Field::new(BATTING_SIDE, DataType::Utf8, false),
        Field::new(THROWING_SIDE, DataType::Utf8, false),
        Field::new(TIME, DataType::Float64, false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_schema_starts_with_frame_ids() {
        let long = long_trajectory_schema();
        for (i, f) in frame_id_fields().iter().enumerate() {
            assert_eq!(long.field(i).name(), f.name());
        }
        assert!(long.field_with_name(JOINT_TYPE_ID).is_ok());
    }
}
