//! Coordinate column names (`<joint>_<axis>`).

use pp_math::Axis;
use std::fmt;
use std::str::FromStr;

/// One coordinate of one joint, e.g. `lKnee_z`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoordinateColumn {
    pub joint: String,
    pub axis: Axis,
}

impl CoordinateColumn {
    pub fn new(joint: impl Into<String>, axis: Axis) -> Self {
        Self {
            joint: joint.into(),
            axis,
        }
    }

    /// The three column names of a joint, in x, y, z order.
    pub fn names_for(joint: &str) -> [String; 3] {
        Axis::ALL.map(|axis| CoordinateColumn::new(joint, axis).to_string())
    }
}

impl fmt::Display for CoordinateColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.joint, self.axis.suffix())
    }
}

impl FromStr for CoordinateColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (joint, axis) = s
            .rsplit_once('_')
            .ok_or_else(|| format!("{s} is not a <joint>_<axis> column"))?;
        let axis = Axis::from_suffix(axis).ok_or_else(|| format!("{s} has no x/y/z suffix"))?;
        if joint.is_empty() {
            return Err(format!("{s} has an empty joint name"));
        }
        Ok(Self::new(joint, axis))
    }
}
