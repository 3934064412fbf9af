//! Parquet readers.

use crate::columns::{f64_column, i64_column, string_column};
use crate::error::{Result, StoreError};
use crate::schema::{
    BATTING_SIDE, CONFIG_SNAPSHOT_KEY, JOINT_TYPE_ID, PITCHER_ID, PITCH_ID, SCHEDULE_ID,
    THROWING_SIDE, TIME,
};
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use pp_common::schema::{is_compatible, SCHEMA_VERSION_KEY};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// A whole table loaded into memory.
#[derive(Debug, Clone)]
pub struct StoredTable {
    pub schema: SchemaRef,
    pub batches: Vec<RecordBatch>,
}

impl StoredTable {
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }

    /// Config snapshot JSON recorded by the producing run, if any.
    pub fn config_snapshot(&self) -> Option<&str> {
        self.schema
            .metadata()
            .get(CONFIG_SNAPSHOT_KEY)
            .map(String::as_str)
    }
}

/// Read every batch of a Parquet file.
///
/// Files carrying a schema version must be compatible with this build;
/// files without one (raw exports) are accepted as-is.
pub fn read_table(path: impl AsRef<Path>) -> Result<StoredTable> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();

    if let Some(version) = schema.metadata().get(SCHEMA_VERSION_KEY) {
        if !is_compatible(version) {
            return Err(StoreError::IncompatibleSchema(version.clone()));
        }
    }

    let reader = builder.with_batch_size(crate::DEFAULT_BATCH_SIZE).build()?;
    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    let table = StoredTable { schema, batches };
    info!(path = %path.display(), rows = table.num_rows(), "table loaded");
    Ok(table)
}

/// One long-format capture row: a single joint at a single timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointSample {
    pub pitch_id: i64,
    pub schedule_id: i64,
    pub pitcher_id: i64,
    pub batting_side: String,
    pub throwing_side: String,
    pub time: f64,
    pub joint_type_id: i64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Decode long-format rows from one batch.
pub fn long_samples_from_batch(batch: &RecordBatch) -> Result<Vec<JointSample>> {
    let pitch_id = i64_column(batch, PITCH_ID)?;
    let schedule_id = i64_column(batch, SCHEDULE_ID)?;
    let pitcher_id = i64_column(batch, PITCHER_ID)?;
    let bats = string_column(batch, BATTING_SIDE)?;
    let throws = string_column(batch, THROWING_SIDE)?;
    let time = f64_column(batch, TIME)?;
    let joint = i64_column(batch, JOINT_TYPE_ID)?;
    let x = f64_column(batch, "x")?;
    let y = f64_column(batch, "y")?;
    let z = f64_column(batch, "z")?;

    let samples = (0..batch.num_rows())
        .map(|i| JointSample {
            pitch_id: pitch_id[i],
            schedule_id: schedule_id[i],
            pitcher_id: pitcher_id[i],
            batting_side: bats[i].clone(),
            throwing_side: throws[i].clone(),
            time: time[i],
            joint_type_id: joint[i],
            x: x[i],
            y: y[i],
            z: z[i],
        })
        .collect();
    Ok(samples)
}

/// Read a long-format capture file.
pub fn read_long_trajectory(path: impl AsRef<Path>) -> Result<Vec<JointSample>> {
    let table = read_table(path)?;
    let mut samples = Vec::with_capacity(table.num_rows());
    for batch in &table.batches {
        samples.extend(long_samples_from_batch(batch)?);
    }
    debug!(samples = samples.len(), "long trajectory decoded");
    Ok(samples)
}
