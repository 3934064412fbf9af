//! Leg-lift detection on the front knee.
//!
//! A frame is a leg-lift candidate when the trailing `window` first
//! differences of the monitored coordinate, ending at that frame, are all
//! strictly positive. The start is the earliest candidate in time order, so
//! the first possible start index is `window`.

use crate::table::{CoordinateColumn, Frame, TrajectoryTable};
use pp_common::{DetectionError, PitchId};
use pp_math::first_trailing_increase;

/// Locates the leg-lift frame of a pitch.
#[derive(Debug, Clone)]
pub struct LegLiftDetector {
    column: CoordinateColumn,
    joint_index: usize,
    window: usize,
}

impl LegLiftDetector {
    /// Bind the detector to `column` of `table`.
    pub fn new(
        table: &TrajectoryTable,
        column: &CoordinateColumn,
        window: usize,
    ) -> Result<Self, DetectionError> {
        if window == 0 {
            return Err(DetectionError::InvalidWindow(window));
        }
        let joint_index = table
            .joint_index(&column.joint)
            .ok_or_else(|| DetectionError::MissingColumn(column.to_string()))?;
        Ok(Self {
            column: column.clone(),
            joint_index,
            window,
        })
    }

    pub fn column(&self) -> &CoordinateColumn {
        &self.column
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Index of the leg-lift frame in a time-sorted pitch.
    pub fn start_index(&self, pitch_id: PitchId, sorted: &[Frame]) -> Result<usize, DetectionError> {
        let values: Vec<f64> = sorted
            .iter()
            .map(|f| f.positions[self.joint_index].component(self.column.axis))
            .collect();
        first_trailing_increase(&values, self.window).ok_or_else(|| DetectionError::NoLegLift {
            pitch_id,
            column: self.column.to_string(),
            window: self.window,
        })
    }
}
