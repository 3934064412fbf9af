//! Event detection: leg lift ("start") and release per pitch.

pub mod leg_lift;
pub mod release;

pub use leg_lift::LegLiftDetector;
pub use release::release_index;

use crate::table::trajectory::sorted_by_time;
use crate::table::{CoordinateColumn, Frame, TrajectoryTable};
use pp_common::{Checkpoint, DetectionError, PitchId};
use tracing::{debug, info};

/// Annotates pitches with exactly one start and one release flag.
#[derive(Debug, Clone)]
pub struct EventDetector {
    leg_lift: LegLiftDetector,
}

impl EventDetector {
    pub fn new(
        table: &TrajectoryTable,
        leg_lift_column: &CoordinateColumn,
        window: usize,
    ) -> Result<Self, DetectionError> {
        Ok(Self {
            leg_lift: LegLiftDetector::new(table, leg_lift_column, window)?,
        })
    }

    /// Sort one pitch by time and flag its start and release frames.
    ///
    /// Any pre-existing start/release flags are cleared first.
    pub fn detect_pitch(
        &self,
        pitch_id: PitchId,
        frames: &[&Frame],
    ) -> Result<Vec<Frame>, DetectionError> {
        if frames.is_empty() {
            return Err(DetectionError::EmptyPitch { pitch_id });
        }
        let mut sorted = sorted_by_time(frames);
        let release = release_index(pitch_id, &sorted)?;
        let start = self.leg_lift.start_index(pitch_id, &sorted)?;

        for frame in &mut sorted {
            frame.marks.set(Checkpoint::Start, false);
            frame.marks.set(Checkpoint::Release, false);
        }
        sorted[start].marks.set(Checkpoint::Start, true);
        sorted[release].marks.set(Checkpoint::Release, true);

        debug!(
            pitch_id = %pitch_id,
            frames = sorted.len(),
            start_index = start,
            release_index = release,
            "events detected"
        );
        Ok(sorted)
    }
}

/// Flag leg lift and release for every pitch of `table`.
///
/// Output groups frames by pitch in first-seen order, each pitch sorted by
/// time. The first failing pitch aborts the call.
pub fn detect_events(
    table: &TrajectoryTable,
    leg_lift_column: &CoordinateColumn,
    window: usize,
) -> Result<TrajectoryTable, DetectionError> {
    let detector = EventDetector::new(table, leg_lift_column, window)?;
    let groups = table
        .pitches()
        .into_iter()
        .map(|(pitch_id, frames)| detector.detect_pitch(pitch_id, &frames))
        .collect::<Result<Vec<_>, _>>()?;
    info!(
        pitches = groups.len(),
        column = %leg_lift_column,
        window,
        "event detection complete"
    );
    Ok(TrajectoryTable::from_parts(table.joints().to_vec(), groups))
}
