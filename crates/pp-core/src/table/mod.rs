//! Trajectory tables and their columnar forms.

pub mod column;
pub mod columnar;
pub mod pivot;
pub mod trajectory;

pub use column::CoordinateColumn;
pub use columnar::{
    features_to_batch, segmented_to_batch, trajectory_from_batches, trajectory_to_batch,
};
pub use pivot::{pivot_long, PivotStats};
pub use trajectory::{Frame, FrameMarks, FrameMeta, TrajectoryTable};
