//! Feature synthesis: one row of path length and checkpoint positions per
//! pitch.

pub mod kinematics;
pub mod snapshot;

pub use kinematics::{JointKinematics, PitchKinematics};
pub use snapshot::checkpoint_frame;

use crate::segment::{segment, SegmentedTable};
use crate::table::trajectory::sorted_by_time;
use crate::table::{Frame, TrajectoryTable};
use kinematics::joint_kinematics;
use pp_common::{Checkpoint, FeatureError, PitchId, PitcherId, ScheduleId};
use pp_math::Axis;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Feature values of one pitch, aligned with [`FeatureTable::columns`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub pitcher_id: PitcherId,
    pub schedule_id: ScheduleId,
    pub pitch_id: PitchId,
    pub values: Vec<f64>,
}

/// Feature rows of many pitches sharing one column layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureTable {
    columns: Vec<String>,
    rows: Vec<FeatureRow>,
}

impl FeatureTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn push(&mut self, row: FeatureRow) {
        debug_assert_eq!(row.values.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Value of `column` for `pitch_id`.
    pub fn value(&self, pitch_id: PitchId, column: &str) -> Option<f64> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows
            .iter()
            .find(|r| r.pitch_id == pitch_id)
            .map(|r| r.values[col])
    }
}

/// Feature column names for `joints`, in row order.
///
/// Per joint: `distance_traveled_<joint>`, then `<joint>_<axis>_<checkpoint>`
/// for every checkpoint and axis.
pub fn feature_columns(joints: &[String]) -> Vec<String> {
    let mut columns = Vec::with_capacity(joints.len() * 16);
    for joint in joints {
        columns.push(format!("distance_traveled_{joint}"));
        for cp in Checkpoint::ALL {
            for axis in Axis::ALL {
                columns.push(format!("{joint}_{}_{}", axis.suffix(), cp.suffix()));
            }
        }
    }
    columns
}

/// Builds feature rows for the pitches of a segmented table.
#[derive(Debug, Clone)]
pub struct FeatureSynthesizer {
    table_joints: Vec<String>,
    joints: Vec<String>,
    distance_label: String,
}

impl FeatureSynthesizer {
    /// `table_joints` are the joint columns of the segmented table;
    /// `joints` the joints of interest, in output order.
    pub fn new(table_joints: &[String], joints: &[String], distance_label: &str) -> Self {
        Self {
            table_joints: table_joints.to_vec(),
            joints: joints.to_vec(),
            distance_label: distance_label.to_string(),
        }
    }

    pub fn columns(&self) -> Vec<String> {
        feature_columns(&self.joints)
    }

    fn joint_indices(&self, pitch_id: PitchId) -> Result<Vec<usize>, FeatureError> {
        self.joints
            .iter()
            .map(|joint| {
                self.table_joints
                    .iter()
                    .position(|j| j == joint)
                    .ok_or_else(|| FeatureError::MissingJoint {
                        pitch_id,
                        joint: joint.clone(),
                    })
            })
            .collect()
    }

    /// Per-frame kinematics of every joint of interest, in time order
    /// whatever the order of `frames`.
    pub fn kinematics(
        &self,
        pitch_id: PitchId,
        frames: &[&Frame],
    ) -> Result<PitchKinematics, FeatureError> {
        if frames.is_empty() {
            return Err(FeatureError::EmptySegment { pitch_id });
        }
        let sorted = sorted_by_time(frames);
        let ordered: Vec<&Frame> = sorted.iter().collect();
        let joints = self
            .joints
            .iter()
            .zip(self.joint_indices(pitch_id)?)
            .map(|(joint, idx)| joint_kinematics(pitch_id, joint, idx, &ordered))
            .collect();
        Ok(PitchKinematics {
            pitch_id,
            distance_label: self.distance_label.clone(),
            joints,
        })
    }

    /// The feature row of one segmented pitch.
    pub fn synthesize(&self, pitch_id: PitchId, frames: &[&Frame]) -> Result<FeatureRow, FeatureError> {
        let kinematics = self.kinematics(pitch_id, frames)?;
        let indices = self.joint_indices(pitch_id)?;

        let mut snapshots = Vec::with_capacity(Checkpoint::ALL.len());
        for cp in Checkpoint::ALL {
            snapshots.push(checkpoint_frame(pitch_id, frames, cp)?);
        }

        let mut values = Vec::with_capacity(self.joints.len() * 16);
        for (joint, idx) in kinematics.joints.iter().zip(indices) {
            values.push(joint.total_path_length);
            for frame in &snapshots {
                values.extend(frame.positions[idx].to_array());
            }
        }

        let meta = frames[0].meta;
        debug!(
            pitch_id = %pitch_id,
            frames = frames.len(),
            "feature row built"
        );
        Ok(FeatureRow {
            pitcher_id: meta.pitcher_id,
            schedule_id: meta.schedule_id,
            pitch_id,
            values,
        })
    }
}

/// Kinematics of one pitch of a segmented table.
pub fn pitch_kinematics(
    segmented: &SegmentedTable,
    pitch_id: PitchId,
    joints: &[String],
    distance_label: &str,
) -> Result<PitchKinematics, FeatureError> {
    let table = segmented.as_table();
    let frames: Vec<&Frame> = table
        .frames()
        .iter()
        .filter(|f| f.pitch_id() == pitch_id)
        .collect();
    FeatureSynthesizer::new(table.joints(), joints, distance_label).kinematics(pitch_id, &frames)
}

/// One feature row per pitch, in first-seen pitch order.
pub fn extract_features(
    segmented: &SegmentedTable,
    joints: &[String],
    distance_label: &str,
) -> Result<FeatureTable, FeatureError> {
    let table = segmented.as_table();
    let synthesizer = FeatureSynthesizer::new(table.joints(), joints, distance_label);
    let mut features = FeatureTable::new(synthesizer.columns());
    for (pitch_id, frames) in table.pitches() {
        features.push(synthesizer.synthesize(pitch_id, &frames)?);
    }
    info!(pitches = features.len(), joints = joints.len(), "features extracted");
    Ok(features)
}

/// Segment an event-annotated table and extract its features.
pub fn segment_and_extract_features(
    annotated: &TrajectoryTable,
    joints: &[String],
    distance_label: &str,
) -> pp_common::Result<FeatureTable> {
    let segmented = segment(annotated)?;
    Ok(extract_features(&segmented, joints, distance_label)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::assign_checkpoints;
    use crate::table::FrameMeta;
    use pp_common::Side;
    use pp_math::Point3;

    fn segmented(pitches: &[(i64, usize)]) -> SegmentedTable {
        let mut frames = Vec::new();
        for &(id, n) in pitches {
            let meta = FrameMeta {
                pitch_id: PitchId(id),
                schedule_id: ScheduleId(11),
                pitcher_id: PitcherId(22),
                batting_side: Side::Left,
                throwing_side: Side::Right,
            };
            let mut pitch: Vec<Frame> = (0..n)
                .map(|i| {
                    let x = i as f64;
                    Frame::new(
                        meta,
                        i as f64 * 0.1,
                        vec![Point3::new(x, 0.0, 0.0), Point3::new(0.0, 2.0 * x, 0.0)],
                    )
                })
                .collect();
            assign_checkpoints(&mut pitch);
            frames.extend(pitch);
        }
        let table =
            TrajectoryTable::new(vec!["wrist".to_string(), "elbow".to_string()], frames).unwrap();
        SegmentedTable::from_processed(table)
    }

    fn joints(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_feature_columns_layout() {
        let cols = feature_columns(&joints(&["wrist"]));
        assert_eq!(cols.len(), 16);
        assert_eq!(cols[0], "distance_traveled_wrist");
        assert_eq!(cols[1], "wrist_x_start");
        assert_eq!(cols[4], "wrist_x_25");
        assert_eq!(cols[15], "wrist_z_release");
    }

    #[test]
    fn test_rows_follow_pitch_and_joint_order() {
        let seg = segmented(&[(5, 4), (2, 8)]);
        let features =
            extract_features(&seg, &joints(&["elbow", "wrist"]), "distance_to_prev").unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features.rows()[0].pitch_id, PitchId(5));
        assert_eq!(features.rows()[0].pitcher_id, PitcherId(22));
        assert_eq!(features.columns()[0], "distance_traveled_elbow");

        assert_eq!(features.value(PitchId(5), "distance_traveled_wrist"), Some(3.0));
        assert_eq!(features.value(PitchId(5), "distance_traveled_elbow"), Some(6.0));
        assert_eq!(features.value(PitchId(5), "wrist_x_25"), Some(1.0));
        assert_eq!(features.value(PitchId(2), "wrist_x_75"), Some(6.0));
        assert_eq!(features.value(PitchId(2), "elbow_y_release"), Some(14.0));
    }

    #[test]
    fn test_missing_joint_fails_the_pitch() {
        let seg = segmented(&[(5, 4)]);
        let err = extract_features(&seg, &joints(&["shoulder"]), "d").unwrap_err();
        assert_eq!(
            err,
            FeatureError::MissingJoint {
                pitch_id: PitchId(5),
                joint: "shoulder".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_checkpoint_fails_the_pitch() {
        let mut table = segmented(&[(5, 4)]).into_table();
        let mut frames = table.frames().to_vec();
        frames[0].marks.time_50 = true;
        table = TrajectoryTable::new(table.joints().to_vec(), frames).unwrap();
        let err = extract_features(&SegmentedTable::from_processed(table), &joints(&["wrist"]), "d")
            .unwrap_err();
        assert!(matches!(
            err,
            FeatureError::Checkpoint {
                checkpoint: Checkpoint::Time50,
                count: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_out_of_order_rows_are_read_in_time_order() {
        let sorted = segmented(&[(5, 5)]);
        let mut frames = sorted.as_table().frames().to_vec();
        frames.swap(1, 3);
        let shuffled = SegmentedTable::from_processed(
            TrajectoryTable::new(sorted.as_table().joints().to_vec(), frames).unwrap(),
        );

        let a = extract_features(&sorted, &joints(&["wrist"]), "d").unwrap();
        let b = extract_features(&shuffled, &joints(&["wrist"]), "d").unwrap();
        assert_eq!(b.value(PitchId(5), "distance_traveled_wrist"), Some(4.0));
        assert_eq!(a, b);

        let k = pitch_kinematics(&shuffled, PitchId(5), &joints(&["wrist"]), "d").unwrap();
        let v = &k.joint("wrist").unwrap().velocities;
        assert_eq!(v[0], None);
        assert!(v[1..].iter().all(|v| v.is_some_and(|v| (v - 10.0).abs() < 1e-9)));
    }

    #[test]
    fn test_pitch_kinematics_exposes_series() {
        let seg = segmented(&[(5, 3)]);
        let k = pitch_kinematics(&seg, PitchId(5), &joints(&["wrist"]), "distance_to_prev").unwrap();
        assert_eq!(k.distance_column("wrist"), "distance_to_prev_wrist");
        assert_eq!(k.joint("wrist").unwrap().distances, vec![0.0, 1.0, 1.0]);

        let err = pitch_kinematics(&seg, PitchId(99), &joints(&["wrist"]), "d").unwrap_err();
        assert_eq!(err, FeatureError::EmptySegment { pitch_id: PitchId(99) });
    }
}
