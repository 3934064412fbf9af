//! Pitch Path math utilities.

pub mod math;

pub use math::geometry::*;
pub use math::series::*;
pub use math::stable::*;
