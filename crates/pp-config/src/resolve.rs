//! Configuration resolution.
//!
//! Each file is looked up in order: explicit CLI path, environment variable,
//! `<XDG config dir>/pitch_path/<file>`, then the built-in default. The first
//! hit wins; a path given explicitly must exist.

use crate::joints::JointCatalog;
use crate::pipeline::PipelineConfig;
use crate::validate::{validate_catalog, validate_pipeline, ValidationError};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming a pipeline config file.
pub const CONFIG_ENV_VAR: &str = "PITCH_PATH_CONFIG";

/// Environment variable naming a joint catalog file.
pub const JOINTS_ENV_VAR: &str = "PITCH_PATH_JOINTS";

/// Directory under the XDG config dir.
const CONFIG_DIR_NAME: &str = "pitch_path";

const PIPELINE_FILE: &str = "pipeline.json";
const JOINTS_FILE: &str = "joints.json";

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration from {source_desc}: {}", join_errors(.errors))]
    Invalid {
        source_desc: String,
        errors: Vec<ValidationError>,
    },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<ConfigError> for pp_common::Error {
    fn from(err: ConfigError) -> Self {
        pp_common::Error::Config(err.to_string())
    }
}

/// Explicit paths supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    pub pipeline: Option<PathBuf>,
    pub joints: Option<PathBuf>,
}

/// Where a resolved configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Cli(PathBuf),
    Env(PathBuf),
    Xdg(PathBuf),
    Builtin,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Cli(p) | ConfigSource::Env(p) | ConfigSource::Xdg(p) => Some(p),
            ConfigSource::Builtin => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Cli(p) => write!(f, "cli:{}", p.display()),
            ConfigSource::Env(p) => write!(f, "env:{}", p.display()),
            ConfigSource::Xdg(p) => write!(f, "xdg:{}", p.display()),
            ConfigSource::Builtin => write!(f, "builtin"),
        }
    }
}

/// Fully resolved and validated configuration.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub pipeline: PipelineConfig,
    pub catalog: JointCatalog,
    pub pipeline_source: ConfigSource,
    pub catalog_source: ConfigSource,
}

/// Resolve configuration from the process environment and XDG directories.
pub fn resolve_config(paths: &ConfigPaths) -> Result<ResolvedConfig, ConfigError> {
    resolve_with(
        paths,
        |key| std::env::var_os(key).map(PathBuf::from),
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME)),
    )
}

/// Resolution with injectable environment lookup and config directory.
pub fn resolve_with<F>(
    paths: &ConfigPaths,
    env: F,
    config_dir: Option<PathBuf>,
) -> Result<ResolvedConfig, ConfigError>
where
    F: Fn(&str) -> Option<PathBuf>,
{
    let pipeline_source = locate(
        paths.pipeline.as_deref(),
        env(CONFIG_ENV_VAR),
        config_dir.as_deref(),
        PIPELINE_FILE,
    );
    let catalog_source = locate(
        paths.joints.as_deref(),
        env(JOINTS_ENV_VAR),
        config_dir.as_deref(),
        JOINTS_FILE,
    );

    let pipeline = match pipeline_source.path() {
        Some(path) => load_pipeline(path)?,
        None => PipelineConfig::default(),
    };
    validate_pipeline(&pipeline).map_err(|errors| ConfigError::Invalid {
        source_desc: pipeline_source.to_string(),
        errors,
    })?;

    let catalog = match catalog_source.path() {
        Some(path) => JointCatalog::from_file(path)?,
        None => JointCatalog::builtin(),
    };
    validate_catalog(&catalog).map_err(|errors| ConfigError::Invalid {
        source_desc: catalog_source.to_string(),
        errors,
    })?;

    Ok(ResolvedConfig {
        pipeline,
        catalog,
        pipeline_source,
        catalog_source,
    })
}

fn locate(
    cli: Option<&Path>,
    env: Option<PathBuf>,
    config_dir: Option<&Path>,
    file_name: &str,
) -> ConfigSource {
    if let Some(p) = cli {
        return ConfigSource::Cli(p.to_path_buf());
    }
    if let Some(p) = env.filter(|p| !p.as_os_str().is_empty()) {
        return ConfigSource::Env(p);
    }
    if let Some(dir) = config_dir {
        let candidate = dir.join(file_name);
        if candidate.is_file() {
            return ConfigSource::Xdg(candidate);
        }
    }
    ConfigSource::Builtin
}

/// Load a pipeline config file without validating it.
pub fn load_pipeline(path: &Path) -> Result<PipelineConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    PipelineConfig::from_json(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
