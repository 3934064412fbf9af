//! Pitch Path common types, IDs, and errors.
//!
//! This crate provides foundational types shared across the pp-* crates:
//! - Pitch, schedule, and pitcher identity types
//! - Handedness and checkpoint vocabulary
//! - The error taxonomy for detection, segmentation, and feature synthesis
//! - Output format selection

pub mod checkpoint;
pub mod error;
pub mod id;
pub mod output;
pub mod schema;
pub mod side;

pub use checkpoint::Checkpoint;
pub use error::{DetectionError, Error, FeatureError, Result, SegmentationError};
pub use id::{PitchId, PitcherId, ScheduleId};
pub use output::OutputFormat;
pub use schema::SCHEMA_VERSION;
pub use side::Side;
