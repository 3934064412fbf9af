//! Long-to-wide pivot of capture samples.
//!
//! Capture files hold one row per (pitch, timestamp, joint). The pipeline
//! wants one row per (pitch, timestamp) with `<joint>_x/_y/_z` columns. Joint
//! ids are resolved through the injected [`JointCatalog`]; samples whose id is
//! not in the catalog are dropped (inner join) and counted. Several samples
//! for the same cell, e.g. from different cameras, are averaged per axis,
//! ignoring missing coordinates.

use super::trajectory::{Frame, FrameMeta, TrajectoryTable};
use pp_common::{Error, PitchId, PitcherId, Result, ScheduleId, Side};
use pp_config::JointCatalog;
use pp_math::Point3;
use pp_store::JointSample;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

/// Bookkeeping from one pivot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PivotStats {
    pub samples: usize,
    pub unknown_joint_samples: usize,
    pub unknown_joint_ids: Vec<i64>,
    pub rows: usize,
    /// Cells that received more than one sample.
    pub averaged_cells: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct RowKey {
    pitch_id: i64,
    schedule_id: i64,
    pitcher_id: i64,
    bats: char,
    throws: char,
    time_bits: u64,
}

#[derive(Debug, Clone, Copy, Default)]
struct CellAccumulator {
    sum: [f64; 3],
    count: [u32; 3],
    samples: u32,
}

impl CellAccumulator {
    fn add(&mut self, v: [f64; 3]) {
        self.samples += 1;
        for axis in 0..3 {
            if !v[axis].is_nan() {
                self.sum[axis] += v[axis];
                self.count[axis] += 1;
            }
        }
    }

    fn mean(&self) -> Point3 {
        let m = |axis: usize| {
            if self.count[axis] == 0 {
                f64::NAN
            } else {
                self.sum[axis] / self.count[axis] as f64
            }
        };
        Point3::new(m(0), m(1), m(2))
    }
}

fn parse_side(value: &str, column: &str, row: usize) -> Result<Side> {
    value
        .parse()
        .map_err(|_| Error::Schema(format!("row {row}: {column} {value:?} is not L or R")))
}

/// Pivot long-format samples into a wide trajectory table.
///
/// Rows are ordered by (pitch_id, schedule_id, pitcher_id, batting side,
/// throwing side, time); joint columns are sorted by name.
pub fn pivot_long(
    samples: &[JointSample],
    catalog: &JointCatalog,
) -> Result<(TrajectoryTable, PivotStats)> {
    let mut stats = PivotStats {
        samples: samples.len(),
        ..PivotStats::default()
    };

    let mut unknown: BTreeSet<i64> = BTreeSet::new();
    let joint_names: BTreeSet<&str> = samples
        .iter()
        .filter_map(|s| {
            let name = catalog.name_of(s.joint_type_id);
            if name.is_none() {
                unknown.insert(s.joint_type_id);
            }
            name
        })
        .collect();
    let joints: Vec<String> = joint_names.iter().map(|s| s.to_string()).collect();
    let joint_slot: HashMap<&str, usize> = joint_names
        .iter()
        .enumerate()
        .map(|(i, name)| (*name, i))
        .collect();

    let mut row_slot: HashMap<RowKey, usize> = HashMap::new();
    let mut rows: Vec<(FrameMeta, f64, Vec<CellAccumulator>)> = Vec::new();

    for (i, s) in samples.iter().enumerate() {
        let Some(col) = catalog.name_of(s.joint_type_id).and_then(|n| joint_slot.get(n)) else {
            stats.unknown_joint_samples += 1;
            continue;
        };
        let bats = parse_side(&s.batting_side, "batting_side", i)?;
        let throws = parse_side(&s.throwing_side, "throwing_side", i)?;
        // -0.0 and 0.0 are the same instant.
        let time = if s.time == 0.0 { 0.0 } else { s.time };
        let key = RowKey {
            pitch_id: s.pitch_id,
            schedule_id: s.schedule_id,
            pitcher_id: s.pitcher_id,
            bats: bats.joint_prefix(),
            throws: throws.joint_prefix(),
            time_bits: time.to_bits(),
        };
        let row = *row_slot.entry(key).or_insert_with(|| {
            let meta = FrameMeta {
                pitch_id: PitchId(s.pitch_id),
                schedule_id: ScheduleId(s.schedule_id),
                pitcher_id: PitcherId(s.pitcher_id),
                batting_side: bats,
                throwing_side: throws,
            };
            rows.push((meta, time, vec![CellAccumulator::default(); joints.len()]));
            rows.len() - 1
        });
        rows[row].2[*col].add([s.x, s.y, s.z]);
    }

    rows.sort_by(|(a, ta, _), (b, tb, _)| {
        a.pitch_id
            .cmp(&b.pitch_id)
            .then(a.schedule_id.cmp(&b.schedule_id))
            .then(a.pitcher_id.cmp(&b.pitcher_id))
            .then(a.batting_side.code().cmp(b.batting_side.code()))
            .then(a.throwing_side.code().cmp(b.throwing_side.code()))
            .then(ta.total_cmp(tb))
    });

    let frames: Vec<Frame> = rows
        .into_iter()
        .map(|(meta, time, cells)| {
            stats.averaged_cells += cells.iter().filter(|c| c.samples > 1).count();
            Frame::new(meta, time, cells.iter().map(CellAccumulator::mean).collect())
        })
        .collect();

    stats.rows = frames.len();
    stats.unknown_joint_ids = unknown.into_iter().collect();
    if stats.unknown_joint_samples > 0 {
        warn!(
            dropped = stats.unknown_joint_samples,
            ids = ?stats.unknown_joint_ids,
            "samples with joint ids missing from the catalog were dropped"
        );
    }
    debug!(
        rows = stats.rows,
        joints = joints.len(),
        averaged = stats.averaged_cells,
        "pivoted long samples"
    );

    Ok((TrajectoryTable::new(joints, frames)?, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pp_config::JointEntry;

    fn catalog() -> JointCatalog {
        JointCatalog::new(vec![
            JointEntry {
                joint_type_id: 1,
                name: "rWrist".to_string(),
            },
            JointEntry {
                joint_type_id: 2,
                name: "lKnee".to_string(),
            },
        ])
    }

    fn sample(pitch: i64, time: f64, joint: i64, x: f64) -> JointSample {
        JointSample {
            pitch_id: pitch,
            schedule_id: 10,
            pitcher_id: 20,
            batting_side: "L".to_string(),
            throwing_side: "R".to_string(),
            time,
            joint_type_id: joint,
            x,
            y: 0.0,
            z: 1.0,
        }
    }

    #[test]
    fn test_pivot_builds_sorted_wide_rows() {
        let samples = vec![
            sample(2, 0.1, 1, 5.0),
            sample(1, 0.2, 2, 3.0),
            sample(1, 0.1, 1, 1.0),
            sample(1, 0.1, 2, 2.0),
        ];
        let (table, stats) = pivot_long(&samples, &catalog()).unwrap();
        assert_eq!(table.joints(), ["lKnee".to_string(), "rWrist".to_string()]);
        assert_eq!(stats.rows, 3);
        let f = table.frames();
        assert_eq!((f[0].pitch_id(), f[0].time), (PitchId(1), 0.1));
        assert_eq!(f[0].positions[0].x, 2.0);
        assert_eq!(f[0].positions[1].x, 1.0);
        // Knee present, wrist absent at t=0.2.
        assert_eq!(f[1].positions[0].x, 3.0);
        assert!(f[1].positions[1].x.is_nan());
        assert_eq!(f[2].pitch_id(), PitchId(2));
    }

    #[test]
    fn test_pivot_averages_duplicate_cells_ignoring_nan() {
        let samples = vec![
            sample(1, 0.0, 1, 1.0),
            sample(1, -0.0, 1, 3.0),
            sample(1, 0.0, 1, f64::NAN),
        ];
        let (table, stats) = pivot_long(&samples, &catalog()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(stats.averaged_cells, 1);
        assert_eq!(table.frames()[0].positions[0].x, 2.0);
        assert_eq!(table.frames()[0].positions[0].z, 1.0);
    }

    #[test]
    fn test_pivot_drops_unknown_joints() {
        let samples = vec![sample(1, 0.0, 1, 1.0), sample(1, 0.0, 99, 1.0)];
        let (table, stats) = pivot_long(&samples, &catalog()).unwrap();
        assert_eq!(table.joints(), ["rWrist".to_string()]);
        assert_eq!(stats.unknown_joint_samples, 1);
        assert_eq!(stats.unknown_joint_ids, vec![99]);
    }

    #[test]
    fn test_pivot_rejects_bad_side() {
        let mut s = sample(1, 0.0, 1, 1.0);
        s.throwing_side = "S".to_string();
        let err = pivot_long(&[s], &catalog()).unwrap_err();
        assert!(err.to_string().contains("throwing_side"));
    }
}
