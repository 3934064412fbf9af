//! Pitch Path core library.
//!
//! Turns one pitcher's joint trajectories into per-pitch features:
//!
//! 1. [`detect::detect_events`] flags the leg-lift and release frames.
//! 2. [`segment::segment`] trims each pitch to that range, places the
//!    percentile checkpoints, and drops handedness from joint names.
//! 3. [`features::extract_features`] builds one row per pitch from path
//!    lengths and checkpoint positions.
//!
//! [`processor::PitcherProcessor`] runs the three stages pitch by pitch under
//! a failure policy; the `pitch-path` binary wraps it with Parquet I/O.

pub mod cli;
pub mod commands;
pub mod detect;
pub mod exit_codes;
pub mod features;
pub mod logging;
pub mod processor;
pub mod segment;
pub mod table;

pub use detect::{detect_events, EventDetector, LegLiftDetector};
pub use features::{
    extract_features, feature_columns, pitch_kinematics, segment_and_extract_features,
    FeatureRow, FeatureSynthesizer, FeatureTable, PitchKinematics,
};
pub use processor::{PitcherProcessor, PitcherReport, SkippedPitch, Stage};
pub use segment::{normalize_column_name, segment, SegmentedTable};
pub use table::{CoordinateColumn, Frame, FrameMarks, FrameMeta, TrajectoryTable};
