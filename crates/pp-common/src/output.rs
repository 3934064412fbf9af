//! Output format selection for run summaries.

use serde::{Deserialize, Serialize};

/// How the CLI reports a finished run on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Machine-readable JSON document.
    Json,
    /// Short human-readable summary.
    #[default]
    Summary,
}
