//! Per-frame kinematics of a segmented pitch.

use crate::table::Frame;
use pp_common::PitchId;
use pp_math::{checked_ratio, compensated_sum};
use serde::Serialize;
use tracing::trace;

/// Distance, velocity, and path length series of one joint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JointKinematics {
    pub joint: String,
    /// Distance from the previous frame; 0 for the first frame or when
    /// either position is missing.
    pub distances: Vec<f64>,
    /// Distance over elapsed time; `None` for the first frame and wherever
    /// the elapsed time is zero or undefined.
    pub velocities: Vec<Option<f64>>,
    pub total_path_length: f64,
}

/// Kinematics of every requested joint over one pitch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchKinematics {
    pub pitch_id: PitchId,
    pub distance_label: String,
    pub joints: Vec<JointKinematics>,
}

impl PitchKinematics {
    /// Name of the per-frame distance column of `joint`.
    pub fn distance_column(&self, joint: &str) -> String {
        format!("{}_{joint}", self.distance_label)
    }

    pub fn joint(&self, name: &str) -> Option<&JointKinematics> {
        self.joints.iter().find(|j| j.joint == name)
    }
}

/// Kinematics of the joint stored at `joint_index` of each frame.
pub(crate) fn joint_kinematics(
    pitch_id: PitchId,
    joint: &str,
    joint_index: usize,
    frames: &[&Frame],
) -> JointKinematics {
    let mut distances = Vec::with_capacity(frames.len());
    let mut velocities = Vec::with_capacity(frames.len());
    if !frames.is_empty() {
        distances.push(0.0);
        velocities.push(None);
    }
    for (k, pair) in frames.windows(2).enumerate() {
        let (prev, cur) = (pair[0], pair[1]);
        let raw = prev.positions[joint_index].distance(&cur.positions[joint_index]);
        let velocity = checked_ratio(raw, cur.time - prev.time);
        if velocity.is_none() {
            trace!(pitch_id = %pitch_id, joint, frame = k + 1, "velocity undefined");
        }
        distances.push(if raw.is_finite() { raw } else { 0.0 });
        velocities.push(velocity);
    }
    let total_path_length = compensated_sum(distances.iter().copied());
    JointKinematics {
        joint: joint.to_string(),
        distances,
        velocities,
        total_path_length,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::FrameMeta;
    use pp_common::{PitcherId, ScheduleId, Side};
    use pp_math::Point3;

    fn frames(points: &[(f64, Point3)]) -> Vec<Frame> {
        let meta = FrameMeta {
            pitch_id: PitchId(1),
            schedule_id: ScheduleId(1),
            pitcher_id: PitcherId(1),
            batting_side: Side::Left,
            throwing_side: Side::Right,
        };
        points
            .iter()
            .map(|&(t, p)| Frame::new(meta, t, vec![p]))
            .collect()
    }

    #[test]
    fn test_distance_velocity_and_path_length() {
        let f = frames(&[
            (0.0, Point3::new(0.0, 0.0, 0.0)),
            (0.5, Point3::new(3.0, 4.0, 0.0)),
            (1.0, Point3::new(3.0, 4.0, 12.0)),
        ]);
        let refs: Vec<&Frame> = f.iter().collect();
        let k = joint_kinematics(PitchId(1), "wrist", 0, &refs);
        assert_eq!(k.distances, vec![0.0, 5.0, 12.0]);
        assert_eq!(k.velocities, vec![None, Some(10.0), Some(24.0)]);
        assert_eq!(k.total_path_length, 17.0);
    }

    #[test]
    fn test_equal_timestamps_leave_velocity_undefined() {
        let f = frames(&[
            (0.1, Point3::new(0.0, 0.0, 0.0)),
            (0.1, Point3::new(1.0, 0.0, 0.0)),
        ]);
        let refs: Vec<&Frame> = f.iter().collect();
        let k = joint_kinematics(PitchId(1), "wrist", 0, &refs);
        assert_eq!(k.distances, vec![0.0, 1.0]);
        assert_eq!(k.velocities, vec![None, None]);
    }

    #[test]
    fn test_missing_position_counts_as_no_movement() {
        let f = frames(&[
            (0.0, Point3::MISSING),
            (0.1, Point3::new(1.0, 0.0, 0.0)),
            (0.2, Point3::new(2.0, 0.0, 0.0)),
        ]);
        let refs: Vec<&Frame> = f.iter().collect();
        let k = joint_kinematics(PitchId(1), "wrist", 0, &refs);
        assert_eq!(k.distances, vec![0.0, 0.0, 1.0]);
        assert_eq!(k.velocities[1], None);
        assert_eq!(k.total_path_length, 1.0);
    }

    #[test]
    fn test_column_names() {
        let k = PitchKinematics {
            pitch_id: PitchId(1),
            distance_label: "distance_to_prev".to_string(),
            joints: vec![],
        };
        assert_eq!(k.distance_column("wrist"), "distance_to_prev_wrist");
    }
}
