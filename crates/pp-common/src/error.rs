//! Error types for Pitch Path.
//!
//! Stage errors (`DetectionError`, `SegmentationError`, `FeatureError`) carry
//! the offending pitch id so callers can choose between failing the batch and
//! skipping the pitch. `Error` unifies them with configuration and I/O errors.

use crate::checkpoint::Checkpoint;
use crate::id::PitchId;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Pitch Path operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures while locating leg lift and release.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectionError {
    #[error("pitch {pitch_id} has no frames")]
    EmptyPitch { pitch_id: PitchId },

    #[error("pitch {pitch_id} has no finite timestamp to locate release")]
    NoRelease { pitch_id: PitchId },

    #[error("pitch {pitch_id}: no {window}-frame increasing run in {column}")]
    NoLegLift {
        pitch_id: PitchId,
        column: String,
        window: usize,
    },

    #[error("leg-lift column {0} not present in trajectory table")]
    MissingColumn(String),

    #[error("leg-lift window must be at least 1, got {0}")]
    InvalidWindow(usize),
}

impl DetectionError {
    pub fn pitch_id(&self) -> Option<PitchId> {
        match self {
            DetectionError::EmptyPitch { pitch_id }
            | DetectionError::NoRelease { pitch_id }
            | DetectionError::NoLegLift { pitch_id, .. } => Some(*pitch_id),
            DetectionError::MissingColumn(_) | DetectionError::InvalidWindow(_) => None,
        }
    }
}

/// Failures while trimming a pitch to its throwing motion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SegmentationError {
    #[error("pitch {pitch_id}: leg lift at index {start_index} comes after release at index {release_index}")]
    StartAfterRelease {
        pitch_id: PitchId,
        start_index: usize,
        release_index: usize,
    },

    #[error("pitch {pitch_id} has no {flag} flag")]
    MissingFlag { pitch_id: PitchId, flag: Checkpoint },

    #[error("columns {first} and {second} both normalize to {normalized}")]
    ColumnCollision {
        first: String,
        second: String,
        normalized: String,
    },
}

impl SegmentationError {
    pub fn pitch_id(&self) -> Option<PitchId> {
        match self {
            SegmentationError::StartAfterRelease { pitch_id, .. }
            | SegmentationError::MissingFlag { pitch_id, .. } => Some(*pitch_id),
            SegmentationError::ColumnCollision { .. } => None,
        }
    }
}

/// Failures while synthesizing a feature row.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    #[error("pitch {pitch_id}: checkpoint {checkpoint} flagged on {count} frames, expected exactly 1")]
    Checkpoint {
        pitch_id: PitchId,
        checkpoint: Checkpoint,
        count: usize,
    },

    #[error("pitch {pitch_id}: joint {joint} has no coordinate columns")]
    MissingJoint { pitch_id: PitchId, joint: String },

    #[error("pitch {pitch_id} has an empty segment")]
    EmptySegment { pitch_id: PitchId },
}

impl FeatureError {
    pub fn pitch_id(&self) -> PitchId {
        match self {
            FeatureError::Checkpoint { pitch_id, .. }
            | FeatureError::MissingJoint { pitch_id, .. }
            | FeatureError::EmptySegment { pitch_id } => *pitch_id,
        }
    }
}

/// Unified error type for Pitch Path.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid joint catalog: {0}")]
    InvalidJointCatalog(String),

    #[error("table schema error: {0}")]
    Schema(String),

    // Pipeline errors (20-29)
    #[error("detection failed: {0}")]
    Detection(#[from] DetectionError),

    #[error("segmentation failed: {0}")]
    Segmentation(#[from] SegmentationError),

    #[error("feature synthesis failed: {0}")]
    Feature(#[from] FeatureError),

    // Storage errors (30-39)
    #[error("storage error: {0}")]
    Storage(String),

    #[error("output file {} already exists (pass overwrite to replace it)", path.display())]
    OutputExists { path: PathBuf },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in JSON output.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidJointCatalog(_) => 11,
            Error::Schema(_) => 12,
            Error::Detection(_) => 20,
            Error::Segmentation(_) => 21,
            Error::Feature(_) => 22,
            Error::Storage(_) => 30,
            Error::OutputExists { .. } => 31,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// The pitch a stage error is scoped to, if any.
    pub fn pitch_id(&self) -> Option<PitchId> {
        match self {
            Error::Detection(e) => e.pitch_id(),
            Error::Segmentation(e) => e.pitch_id(),
            Error::Feature(e) => Some(e.pitch_id()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_errors_keep_pitch_id() {
        let err: Error = DetectionError::NoLegLift {
            pitch_id: PitchId(9),
            column: "lknee_z".to_string(),
            window: 30,
        }
        .into();
        assert_eq!(err.code(), 20);
        assert_eq!(err.pitch_id(), Some(PitchId(9)));

        let err: Error = FeatureError::Checkpoint {
            pitch_id: PitchId(3),
            checkpoint: Checkpoint::Time50,
            count: 0,
        }
        .into();
        assert_eq!(err.pitch_id(), Some(PitchId(3)));
        assert!(err.to_string().contains("time_50"));
    }

    #[test]
    fn test_table_level_errors_have_no_pitch() {
        let err: Error = DetectionError::InvalidWindow(0).into();
        assert_eq!(err.pitch_id(), None);
        let err = Error::Config("bad".to_string());
        assert_eq!(err.pitch_id(), None);
        assert_eq!(err.code(), 10);
    }
}
