//! Trimming a pitch to its throwing motion and placing checkpoints.

use crate::table::trajectory::sorted_by_time;
use crate::table::{Frame, FrameMarks};
use pp_common::{Checkpoint, PitchId, SegmentationError};
use pp_math::percentile_index;

/// Flag start, percentile, and release checkpoints on a trimmed pitch.
///
/// Existing flags are replaced. Start is the first frame, release the last,
/// and each percentile sits at `floor(fraction * len)`.
pub fn assign_checkpoints(frames: &mut [Frame]) {
    for frame in frames.iter_mut() {
        frame.marks = FrameMarks::default();
    }
    let len = frames.len();
    let Some(last) = len.checked_sub(1) else {
        return;
    };
    frames[0].marks.set(Checkpoint::Start, true);
    frames[last].marks.set(Checkpoint::Release, true);
    for cp in Checkpoint::PERCENTILES {
        if let Some(idx) = cp.fraction().and_then(|f| percentile_index(len, f)) {
            frames[idx].marks.set(cp, true);
        }
    }
}

/// Trim one annotated pitch to the inclusive range from its first start
/// flag to its first release flag.
pub fn segment_pitch(
    pitch_id: PitchId,
    frames: &[&Frame],
) -> Result<Vec<Frame>, SegmentationError> {
    let sorted = sorted_by_time(frames);
    let find = |cp: Checkpoint| {
        sorted
            .iter()
            .position(|f| f.marks.get(cp))
            .ok_or(SegmentationError::MissingFlag { pitch_id, flag: cp })
    };
    let start_index = find(Checkpoint::Start)?;
    let release_index = find(Checkpoint::Release)?;
    if start_index > release_index {
        return Err(SegmentationError::StartAfterRelease {
            pitch_id,
            start_index,
            release_index,
        });
    }

    let mut trimmed = sorted[start_index..=release_index].to_vec();
    assign_checkpoints(&mut trimmed);
    Ok(trimmed)
}
