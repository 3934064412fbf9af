//! Per-pitcher orchestration of detection, segmentation, and features.
//!
//! Every pitch runs through the stages on its own, so one bad pitch can be
//! dropped (under [`FailurePolicy::SkipAndLog`]) without touching the rest.
//! Table-level problems such as a missing leg-lift column always fail.

use crate::detect::EventDetector;
use crate::features::{FeatureSynthesizer, FeatureTable};
use crate::segment::{normalize_joint_names, segment_pitch, SegmentedTable};
use crate::table::trajectory::sorted_by_time;
use crate::table::{CoordinateColumn, Frame, TrajectoryTable};
use pp_common::{Error, PitchId, PitcherId, Result, ScheduleId, Side};
use pp_config::{FailurePolicy, PipelineConfig};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{info, warn};

/// Pipeline stage a pitch failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Detection,
    Segmentation,
    Features,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Detection => write!(f, "detection"),
            Stage::Segmentation => write!(f, "segmentation"),
            Stage::Features => write!(f, "features"),
        }
    }
}

/// A pitch dropped under the skip policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedPitch {
    pub pitch_id: PitchId,
    pub stage: Stage,
    pub code: u32,
    pub reason: String,
}

/// Result of processing one pitcher.
#[derive(Debug, Clone)]
pub struct PitcherReport {
    pub pitcher_id: PitcherId,
    pub schedule_id: ScheduleId,
    pub throwing_side: Side,
    pub front_leg: Side,
    pub segmented: SegmentedTable,
    pub features: FeatureTable,
    pub skipped: Vec<SkippedPitch>,
}

/// Serializable digest of a [`PitcherReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitcherSummary {
    pub pitcher_id: PitcherId,
    pub schedule_id: ScheduleId,
    pub throwing_side: Side,
    pub front_leg: Side,
    pub segmented_rows: usize,
    pub feature_rows: usize,
    pub skipped: Vec<SkippedPitch>,
}

impl PitcherReport {
    pub fn summary(&self) -> PitcherSummary {
        PitcherSummary {
            pitcher_id: self.pitcher_id,
            schedule_id: self.schedule_id,
            throwing_side: self.throwing_side,
            front_leg: self.front_leg,
            segmented_rows: self.segmented.as_table().len(),
            feature_rows: self.features.len(),
            skipped: self.skipped.clone(),
        }
    }
}

struct Identity {
    pitcher_id: PitcherId,
    schedule_id: ScheduleId,
    throwing_side: Side,
}

/// Runs the full pipeline for one pitcher's trajectory table.
#[derive(Debug, Clone)]
pub struct PitcherProcessor {
    config: PipelineConfig,
}

impl PitcherProcessor {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// One pitcher, one schedule, one throwing arm.
    fn identity(table: &TrajectoryTable) -> Result<Identity> {
        let frames = table.frames();
        let Some(first) = frames.first() else {
            return Err(Error::Schema("trajectory table has no frames".to_string()));
        };
        let pitchers: BTreeSet<PitcherId> = frames.iter().map(|f| f.meta.pitcher_id).collect();
        let schedules: BTreeSet<ScheduleId> = frames.iter().map(|f| f.meta.schedule_id).collect();
        if pitchers.len() > 1 || schedules.len() > 1 {
            return Err(Error::Schema(format!(
                "expected one pitcher and schedule per table, found pitchers {pitchers:?} and schedules {schedules:?}"
            )));
        }
        let sides: BTreeSet<&str> = frames.iter().map(|f| f.meta.throwing_side.code()).collect();
        if sides.len() > 1 {
            return Err(Error::Config(format!(
                "pitcher {} has more than one throwing side",
                first.meta.pitcher_id
            )));
        }
        Ok(Identity {
            pitcher_id: first.meta.pitcher_id,
            schedule_id: first.meta.schedule_id,
            throwing_side: first.meta.throwing_side,
        })
    }

    /// Apply the failure policy to one pitch's error.
    fn on_failure(
        &self,
        pitch_id: PitchId,
        stage: Stage,
        err: Error,
        skipped: &mut Vec<SkippedPitch>,
    ) -> Result<()> {
        match self.config.failure_policy {
            FailurePolicy::FailFast => Err(err),
            FailurePolicy::SkipAndLog => {
                warn!(pitch_id = %pitch_id, stage = %stage, error = %err, "pitch skipped");
                skipped.push(SkippedPitch {
                    pitch_id,
                    stage,
                    code: err.code(),
                    reason: err.to_string(),
                });
                Ok(())
            }
        }
    }

    /// Process a raw wide trajectory table: select the throwing-arm and
    /// front-leg joints, detect events, segment, and build features.
    pub fn process(&self, raw: &TrajectoryTable) -> Result<PitcherReport> {
        let id = Self::identity(raw)?;
        let front_leg = id.throwing_side.opposite();
        let selected = raw.select_joints(&self.config.tracked_joints(id.throwing_side))?;
        let leg_lift = CoordinateColumn::new(
            self.config.leg_lift_joint_for(id.throwing_side),
            self.config.leg_lift_axis,
        );
        let detector = EventDetector::new(&selected, &leg_lift, self.config.window)?;
        let joints = normalize_joint_names(selected.joints())?;
        let synthesizer = FeatureSynthesizer::new(
            &joints,
            &self.config.joints_of_interest,
            &self.config.distance_label,
        );
        info!(
            pitcher_id = %id.pitcher_id,
            schedule_id = %id.schedule_id,
            throws = %id.throwing_side,
            leg_lift = %leg_lift,
            pitches = selected.pitch_ids().len(),
            "processing pitcher"
        );

        let mut groups = Vec::new();
        let mut features = FeatureTable::new(synthesizer.columns());
        let mut skipped = Vec::new();
        for (pitch_id, frames) in selected.pitches() {
            let annotated = match detector.detect_pitch(pitch_id, &frames) {
                Ok(a) => a,
                Err(e) => {
                    self.on_failure(pitch_id, Stage::Detection, e.into(), &mut skipped)?;
                    continue;
                }
            };
            let refs: Vec<&Frame> = annotated.iter().collect();
            let trimmed = match segment_pitch(pitch_id, &refs) {
                Ok(t) => t,
                Err(e) => {
                    self.on_failure(pitch_id, Stage::Segmentation, e.into(), &mut skipped)?;
                    continue;
                }
            };
            let refs: Vec<&Frame> = trimmed.iter().collect();
            match synthesizer.synthesize(pitch_id, &refs) {
                Ok(row) => {
                    features.push(row);
                    groups.push(trimmed);
                }
                Err(e) => self.on_failure(pitch_id, Stage::Features, e.into(), &mut skipped)?,
            }
        }

        let segmented = SegmentedTable::from_segments(joints, groups);
        info!(
            pitcher_id = %id.pitcher_id,
            feature_rows = features.len(),
            skipped = skipped.len(),
            "pitcher processed"
        );
        Ok(PitcherReport {
            pitcher_id: id.pitcher_id,
            schedule_id: id.schedule_id,
            throwing_side: id.throwing_side,
            front_leg,
            segmented,
            features,
            skipped,
        })
    }

    /// Build features from an already segmented table.
    pub fn process_segmented(&self, segmented: &SegmentedTable) -> Result<PitcherReport> {
        let table = segmented.as_table();
        let id = Self::identity(table)?;
        let synthesizer = FeatureSynthesizer::new(
            table.joints(),
            &self.config.joints_of_interest,
            &self.config.distance_label,
        );
        let mut features = FeatureTable::new(synthesizer.columns());
        let mut skipped = Vec::new();
        let mut groups = Vec::new();
        for (pitch_id, frames) in table.pitches() {
            match synthesizer.synthesize(pitch_id, &frames) {
                Ok(row) => {
                    features.push(row);
                    groups.push(sorted_by_time(&frames));
                }
                Err(e) => self.on_failure(pitch_id, Stage::Features, e.into(), &mut skipped)?,
            }
        }
        info!(
            pitcher_id = %id.pitcher_id,
            feature_rows = features.len(),
            skipped = skipped.len(),
            "features rebuilt from processed table"
        );
        Ok(PitcherReport {
            pitcher_id: id.pitcher_id,
            schedule_id: id.schedule_id,
            throwing_side: id.throwing_side,
            front_leg: id.throwing_side.opposite(),
            segmented: SegmentedTable::from_segments(table.joints().to_vec(), groups),
            features,
            skipped,
        })
    }
}
