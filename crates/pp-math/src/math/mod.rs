//! Core math modules.

pub mod geometry;
pub mod series;
pub mod stable;
