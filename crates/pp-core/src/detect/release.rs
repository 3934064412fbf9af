//! Release frame: the sample closest to time zero.

use crate::table::Frame;
use pp_common::{DetectionError, PitchId};
use pp_math::argmin_abs;

/// Index of the release frame in a time-sorted pitch.
///
/// Ties go to the earliest frame; non-finite timestamps never win.
pub fn release_index(pitch_id: PitchId, sorted: &[Frame]) -> Result<usize, DetectionError> {
    let times: Vec<f64> = sorted.iter().map(|f| f.time).collect();
    argmin_abs(&times).ok_or(DetectionError::NoRelease { pitch_id })
}
