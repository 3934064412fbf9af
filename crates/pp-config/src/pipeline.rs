//! Pipeline configuration types.

use pp_common::Side;
use pp_math::Axis;
use serde::{Deserialize, Serialize};

/// What to do when a single pitch fails detection, segmentation, or
/// feature synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Abort the whole pitcher on the first failing pitch.
    #[default]
    FailFast,
    /// Drop the failing pitch, log it, and keep going.
    SkipAndLog,
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailurePolicy::FailFast => write!(f, "fail_fast"),
            FailurePolicy::SkipAndLog => write!(f, "skip_and_log"),
        }
    }
}

/// Complete pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub schema_version: String,

    /// Number of consecutive increasing knee samples that marks a leg lift.
    pub window: usize,

    /// Side-agnostic joints that receive features, in output column order.
    pub joints_of_interest: Vec<String>,

    /// Base name of the per-frame distance column.
    pub distance_label: String,

    /// Joint (without side prefix) whose motion marks the leg lift.
    pub leg_lift_joint: String,

    /// Axis of `leg_lift_joint` monitored for the increasing run.
    pub leg_lift_axis: Axis,

    /// Throwing-arm joints (without side prefix) kept from the capture.
    pub arm_joints: Vec<String>,

    pub failure_policy: FailurePolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            window: 30,
            joints_of_interest: vec![
                "wrist".to_string(),
                "elbow".to_string(),
                "shoulder".to_string(),
            ],
            distance_label: "distance_to_prev".to_string(),
            leg_lift_joint: "Knee".to_string(),
            leg_lift_axis: Axis::Z,
            arm_joints: vec![
                "Shoulder".to_string(),
                "Elbow".to_string(),
                "Wrist".to_string(),
            ],
            failure_policy: FailurePolicy::FailFast,
        }
    }
}

impl PipelineConfig {
    /// Parse from a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Side-prefixed joints to keep for a pitcher throwing with `throws`:
    /// the throwing arm plus the front-leg joint.
    pub fn tracked_joints(&self, throws: Side) -> Vec<String> {
        let mut joints: Vec<String> = self.arm_joints.iter().map(|j| throws.joint(j)).collect();
        joints.push(self.leg_lift_joint_for(throws));
        joints
    }

    /// Side-prefixed leg-lift joint: the front leg is opposite the throwing arm.
    pub fn leg_lift_joint_for(&self, throws: Side) -> String {
        throws.opposite().joint(&self.leg_lift_joint)
    }
}
