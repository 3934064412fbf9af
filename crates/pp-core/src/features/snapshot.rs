//! Joint positions at checkpoints.

use crate::table::Frame;
use pp_common::{Checkpoint, FeatureError, PitchId};

/// The single frame of a pitch flagged with `checkpoint`.
pub fn checkpoint_frame<'a>(
    pitch_id: PitchId,
    frames: &[&'a Frame],
    checkpoint: Checkpoint,
) -> Result<&'a Frame, FeatureError> {
    let flagged: Vec<&'a Frame> = frames
        .iter()
        .copied()
        .filter(|f| f.marks.get(checkpoint))
        .collect();
    match flagged.as_slice() {
        [frame] => Ok(*frame),
        other => Err(FeatureError::Checkpoint {
            pitch_id,
            checkpoint,
            count: other.len(),
        }),
    }
}
