//! Config snapshots recorded alongside output tables.
//!
//! A feature file is only comparable with another if both were produced with
//! the same window, joints, and catalog; the snapshot makes that checkable.

use crate::pipeline::PipelineConfig;
use crate::resolve::ResolvedConfig;
use serde::{Deserialize, Serialize};

/// Serializable record of the configuration a run used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    pub config_schema_version: String,
    pub pipeline: PipelineConfig,
    pub pipeline_source: String,
    pub catalog_source: String,
    pub catalog_joints: usize,
}

impl ConfigSnapshot {
    pub fn from_resolved(resolved: &ResolvedConfig) -> Self {
        Self {
            config_schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            pipeline: resolved.pipeline.clone(),
            pipeline_source: resolved.pipeline_source.to_string(),
            catalog_source: resolved.catalog_source.to_string(),
            catalog_joints: resolved.catalog.len(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
