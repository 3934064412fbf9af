//! Pitch Path table storage.
//!
//! This crate provides:
//! - Arrow schema definitions for raw trajectories
//! - Typed column extraction with integer coercion
//! - Parquet reader for long-format captures and processed tables
//! - Parquet writer with an overwrite guard and output path layout

pub mod columns;
pub mod error;
pub mod reader;
pub mod schema;
pub mod writer;

pub use error::StoreError;
pub use reader::{read_long_trajectory, read_table, JointSample, StoredTable};
pub use schema::{long_trajectory_schema, TableName};
pub use writer::{OutputLayout, TableWriter, WriterConfig};

/// Default batch size for Parquet reads.
pub const DEFAULT_BATCH_SIZE: usize = 8192;
