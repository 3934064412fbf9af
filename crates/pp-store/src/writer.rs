//! Parquet writer with an overwrite guard.
//!
//! Output files are opened with `create_new` unless the caller explicitly
//! allows overwriting, so an existing result is never clobbered by accident.
//! A write that fails midway removes the partial file.

use crate::error::{Result, StoreError};
use crate::schema::{TableName, CONFIG_SNAPSHOT_KEY, TABLE_NAME_KEY};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::WriterProperties;
use pp_common::schema::{SCHEMA_VERSION, SCHEMA_VERSION_KEY};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Writer configuration.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Replace existing files instead of failing.
    pub overwrite: bool,
    /// Parquet compression codec.
    pub compression: Compression,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            overwrite: false,
            compression: Compression::ZSTD(ZstdLevel::default()),
        }
    }
}

impl WriterConfig {
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// Directory layout of run outputs:
/// `<root>/<table dir>/sched_id<S>_pitcher<P>.parquet`.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, table: TableName, schedule_id: i64, pitcher_id: i64) -> PathBuf {
        self.root
            .join(table.dir_name())
            .join(format!("sched_id{schedule_id}_pitcher{pitcher_id}.parquet"))
    }
}

/// Writes record batches to Parquet files.
#[derive(Debug, Clone, Default)]
pub struct TableWriter {
    config: WriterConfig,
}

impl TableWriter {
    pub fn new(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Attach version, table name, and optional config snapshot to the
    /// batch's schema metadata.
    pub fn annotate(
        batch: RecordBatch,
        table: TableName,
        config_snapshot: Option<&str>,
    ) -> Result<RecordBatch> {
        let mut metadata: HashMap<String, String> = batch.schema().metadata().clone();
        metadata.insert(SCHEMA_VERSION_KEY.to_string(), SCHEMA_VERSION.to_string());
        metadata.insert(TABLE_NAME_KEY.to_string(), table.to_string());
        if let Some(snapshot) = config_snapshot {
            metadata.insert(CONFIG_SNAPSHOT_KEY.to_string(), snapshot.to_string());
        }
        let schema = batch.schema().as_ref().clone().with_metadata(metadata);
        Ok(batch.with_schema(Arc::new(schema))?)
    }

    fn open(&self, path: &Path) -> Result<File> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut options = OpenOptions::new();
        options.write(true);
        if self.config.overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }
        options.open(path).map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                StoreError::OutputExists {
                    path: path.to_path_buf(),
                }
            } else {
                StoreError::Io(e)
            }
        })
    }

    /// Write one batch to `path`.
    pub fn write(&self, path: &Path, batch: &RecordBatch) -> Result<()> {
        let file = self.open(path)?;
        debug!(path = %path.display(), overwrite = self.config.overwrite, "output opened");

        let props = WriterProperties::builder()
            .set_compression(self.config.compression)
            .build();
        let result = ArrowWriter::try_new(file, batch.schema(), Some(props))
            .and_then(|mut writer| {
                writer.write(batch)?;
                writer.close()
            });

        match result {
            Ok(_) => {
                info!(path = %path.display(), rows = batch.num_rows(), "table written");
                Ok(())
            }
            Err(e) => {
                if let Err(rm) = fs::remove_file(path) {
                    warn!(path = %path.display(), error = %rm, "failed to remove partial output");
                }
                Err(e.into())
            }
        }
    }
}
