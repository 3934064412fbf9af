//! Segmentation: trim pitches to leg lift through release, place percentile
//! checkpoints, and drop handedness from joint names.

pub mod checkpoints;
pub mod rename;

pub use checkpoints::{assign_checkpoints, segment_pitch};
pub use rename::{normalize_column_name, normalize_joint_names};

use crate::table::{Frame, TrajectoryTable};
use pp_common::SegmentationError;
use tracing::info;

/// A trajectory table whose pitches are trimmed and checkpointed, with
/// side-neutral joint names.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SegmentedTable(TrajectoryTable);

impl SegmentedTable {
    /// Wrap a table that was segmented earlier, e.g. read back from a
    /// processed file. Checkpoint flags are checked when features are built.
    pub fn from_processed(table: TrajectoryTable) -> Self {
        Self(table)
    }

    pub(crate) fn from_segments(joints: Vec<String>, groups: Vec<Vec<Frame>>) -> Self {
        Self(TrajectoryTable::from_parts(joints, groups))
    }

    pub fn as_table(&self) -> &TrajectoryTable {
        &self.0
    }

    pub fn into_table(self) -> TrajectoryTable {
        self.0
    }
}

/// Segment every pitch of an event-annotated table.
///
/// Pitches keep first-seen order; the first failing pitch aborts the call.
pub fn segment(annotated: &TrajectoryTable) -> Result<SegmentedTable, SegmentationError> {
    let joints = normalize_joint_names(annotated.joints())?;
    let groups = annotated
        .pitches()
        .into_iter()
        .map(|(pitch_id, frames)| segment_pitch(pitch_id, &frames))
        .collect::<Result<Vec<_>, _>>()?;
    let segmented = SegmentedTable::from_segments(joints, groups);
    info!(
        pitches = annotated.pitch_ids().len(),
        rows = segmented.as_table().len(),
        "segmentation complete"
    );
    Ok(segmented)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::FrameMeta;
    use pp_common::{Checkpoint, PitchId, PitcherId, ScheduleId, Side};
    use pp_math::Point3;

    fn pitch(id: i64, n: usize, start: usize, release: usize) -> Vec<Frame> {
        let meta = FrameMeta {
            pitch_id: PitchId(id),
            schedule_id: ScheduleId(1),
            pitcher_id: PitcherId(1),
            batting_side: Side::Left,
            throwing_side: Side::Right,
        };
        (0..n)
            .map(|i| {
                let mut f = Frame::new(meta, i as f64 - release as f64, vec![Point3::default(); 2]);
                f.marks.start = i == start;
                f.marks.release = i == release;
                f
            })
            .collect()
    }

    #[test]
    fn test_segment_renames_and_concatenates() {
        let mut frames = pitch(7, 10, 2, 6);
        frames.extend(pitch(3, 6, 0, 3));
        let table =
            TrajectoryTable::new(vec!["rWrist".to_string(), "lKnee".to_string()], frames).unwrap();
        let seg = segment(&table).unwrap();
        let t = seg.as_table();
        assert_eq!(t.joints(), ["wrist".to_string(), "knee".to_string()]);
        assert_eq!(t.pitch_ids(), vec![PitchId(7), PitchId(3)]);
        assert_eq!(t.len(), 5 + 4);
        for (_, frames) in t.pitches() {
            for cp in Checkpoint::ALL {
                assert_eq!(frames.iter().filter(|f| f.marks.get(cp)).count(), 1);
            }
        }
    }

    #[test]
    fn test_segment_propagates_pitch_failure() {
        let table = TrajectoryTable::new(vec!["rWrist".to_string()], {
            let mut f = pitch(4, 3, 2, 1);
            for frame in &mut f {
                frame.positions.truncate(1);
            }
            f
        })
        .unwrap();
        let err = segment(&table).unwrap_err();
        assert_eq!(err.pitch_id(), Some(PitchId(4)));
    }
}
