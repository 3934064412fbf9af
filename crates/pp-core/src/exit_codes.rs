//! Exit codes for the pitch-path CLI.
//!
//! Exit codes communicate the run outcome without requiring output parsing.

use pp_common::Error;

/// Exit codes for pitch-path operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every pitch processed
    Clean = 0,

    /// Outputs written, but some pitches were skipped
    PartialSkip = 1,

    /// Invalid command-line arguments
    ArgsError = 2,

    /// Configuration error (bad config file, joint catalog, mixed handedness)
    ConfigError = 10,

    /// Input table does not have the expected schema
    SchemaError = 11,

    /// A pitch failed detection, segmentation, or feature synthesis
    PipelineError = 12,

    /// Output file already exists and overwrite was not requested
    OutputExists = 13,

    /// I/O or storage error
    IoError = 14,

    /// Internal/unknown error
    InternalError = 99,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if this exit code indicates success.
    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Clean | ExitCode::PartialSkip)
    }

    /// Check if this exit code indicates an error requiring attention.
    pub fn is_error(self) -> bool {
        (self as i32) >= 10
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config(_) | Error::InvalidJointCatalog(_) => ExitCode::ConfigError,
            Error::Schema(_) => ExitCode::SchemaError,
            Error::Detection(_) | Error::Segmentation(_) | Error::Feature(_) => {
                ExitCode::PipelineError
            }
            Error::OutputExists { .. } => ExitCode::OutputExists,
            Error::Storage(_) | Error::Io(_) => ExitCode::IoError,
            Error::Json(_) => ExitCode::InternalError,
        }
    }
}
