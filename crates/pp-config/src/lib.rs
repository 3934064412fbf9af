//! Pitch Path configuration loading and validation.
//!
//! This crate provides:
//! - Typed pipeline configuration (leg-lift window, joints of interest, failure policy)
//! - The joint catalog mapping capture joint ids to joint names
//! - Config resolution (CLI → env → XDG → defaults)
//! - Semantic validation
//! - Config snapshots embedded in output tables

pub mod joints;
pub mod pipeline;
pub mod resolve;
pub mod snapshot;
pub mod validate;

pub use joints::{JointCatalog, JointEntry};
pub use pipeline::{FailurePolicy, PipelineConfig};
pub use resolve::{resolve_config, ConfigError, ConfigPaths, ConfigSource, ResolvedConfig};
pub use snapshot::ConfigSnapshot;
pub use validate::{ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
