//! In-memory trajectory tables.
//!
//! A [`TrajectoryTable`] holds one pitcher's frames for many pitches. Joint
//! columns are shared by every frame: `joints[i]` names the joint whose
//! position is `frame.positions[i]`.

use pp_common::{Checkpoint, Error, PitchId, PitcherId, Result, ScheduleId, Side};
use pp_math::Point3;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Identifying metadata of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameMeta {
    pub pitch_id: PitchId,
    pub schedule_id: ScheduleId,
    pub pitcher_id: PitcherId,
    pub batting_side: Side,
    pub throwing_side: Side,
}

/// Event and checkpoint flags of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameMarks {
    pub start: bool,
    pub time_25: bool,
    pub time_50: bool,
    pub time_75: bool,
    pub release: bool,
}

impl FrameMarks {
    pub fn get(&self, checkpoint: Checkpoint) -> bool {
        match checkpoint {
            Checkpoint::Start => self.start,
            Checkpoint::Time25 => self.time_25,
            Checkpoint::Time50 => self.time_50,
            Checkpoint::Time75 => self.time_75,
            Checkpoint::Release => self.release,
        }
    }

    pub fn set(&mut self, checkpoint: Checkpoint, value: bool) {
        match checkpoint {
            Checkpoint::Start => self.start = value,
            Checkpoint::Time25 => self.time_25 = value,
            Checkpoint::Time50 => self.time_50 = value,
            Checkpoint::Time75 => self.time_75 = value,
            Checkpoint::Release => self.release = value,
        }
    }
}

/// One row of a trajectory table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub meta: FrameMeta,
    /// Signed seconds relative to release.
    pub time: f64,
    pub positions: Vec<Point3>,
    pub marks: FrameMarks,
}

impl Frame {
    pub fn new(meta: FrameMeta, time: f64, positions: Vec<Point3>) -> Self {
        Self {
            meta,
            time,
            positions,
            marks: FrameMarks::default(),
        }
    }

    pub fn pitch_id(&self) -> PitchId {
        self.meta.pitch_id
    }
}

/// Frames of one pitcher with shared joint columns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrajectoryTable {
    joints: Vec<String>,
    frames: Vec<Frame>,
}

impl TrajectoryTable {
    /// Build a table, checking joint names are unique and every frame has
    /// one position per joint.
    pub fn new(joints: Vec<String>, frames: Vec<Frame>) -> Result<Self> {
        let mut seen = HashSet::new();
        for j in &joints {
            if !seen.insert(j.as_str()) {
                return Err(Error::Schema(format!("duplicate joint column {j}")));
            }
        }
        if let Some((row, f)) = frames
            .iter()
            .enumerate()
            .find(|(_, f)| f.positions.len() != joints.len())
        {
            return Err(Error::Schema(format!(
                "row {row} has {} positions for {} joints",
                f.positions.len(),
                joints.len()
            )));
        }
        Ok(Self { joints, frames })
    }

    /// Concatenate per-pitch frame groups sharing the same joints.
    pub(crate) fn from_parts(joints: Vec<String>, groups: Vec<Vec<Frame>>) -> Self {
        Self {
            joints,
            frames: groups.into_iter().flatten().collect(),
        }
    }

    pub fn joints(&self) -> &[String] {
        &self.joints
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn joint_index(&self, joint: &str) -> Option<usize> {
        self.joints.iter().position(|j| j == joint)
    }

    /// Pitch ids in first-seen order.
    pub fn pitch_ids(&self) -> Vec<PitchId> {
        let mut seen = HashSet::new();
        self.frames
            .iter()
            .map(Frame::pitch_id)
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Frames grouped by pitch, groups in first-seen pitch order and frames
    /// in table order within each group.
    pub fn pitches(&self) -> Vec<(PitchId, Vec<&Frame>)> {
        let mut slot: HashMap<PitchId, usize> = HashMap::new();
        let mut groups: Vec<(PitchId, Vec<&Frame>)> = Vec::new();
        for frame in &self.frames {
            let idx = *slot.entry(frame.pitch_id()).or_insert_with(|| {
                groups.push((frame.pitch_id(), Vec::new()));
                groups.len() - 1
            });
            groups[idx].1.push(frame);
        }
        groups
    }

    /// Split into one table per (schedule, pitcher), in first-seen order.
    pub fn split_by_pitcher(&self) -> Vec<((ScheduleId, PitcherId), TrajectoryTable)> {
        let mut slot: HashMap<(ScheduleId, PitcherId), usize> = HashMap::new();
        let mut groups: Vec<((ScheduleId, PitcherId), TrajectoryTable)> = Vec::new();
        for frame in &self.frames {
            let key = (frame.meta.schedule_id, frame.meta.pitcher_id);
            let idx = *slot.entry(key).or_insert_with(|| {
                groups.push((
                    key,
                    TrajectoryTable {
                        joints: self.joints.clone(),
                        frames: Vec::new(),
                    },
                ));
                groups.len() - 1
            });
            groups[idx].1.frames.push(frame.clone());
        }
        groups
    }

    /// Keep only the named joints, in the given order.
    pub fn select_joints(&self, joints: &[String]) -> Result<Self> {
        let indices = joints
            .iter()
            .map(|j| {
                self.joint_index(j)
                    .ok_or_else(|| Error::Schema(format!("joint {j} not present in table")))
            })
            .collect::<Result<Vec<_>>>()?;
        let frames = self
            .frames
            .iter()
            .map(|f| Frame {
                positions: indices.iter().map(|&i| f.positions[i]).collect(),
                ..f.clone()
            })
            .collect();
        Ok(Self {
            joints: joints.to_vec(),
            frames,
        })
    }
}

/// Sort frames by timestamp, keeping input order among equal timestamps.
pub(crate) fn sorted_by_time(frames: &[&Frame]) -> Vec<Frame> {
    let mut sorted: Vec<Frame> = frames.iter().map(|f| (*f).clone()).collect();
    sorted.sort_by(|a, b| a.time.total_cmp(&b.time));
    sorted
}
