//! Schema versioning and compatibility.

/// Current schema version for processed and feature tables.
///
/// Follows semver: MAJOR.MINOR.PATCH
/// - MAJOR: Breaking changes (column removals, type changes)
/// - MINOR: Additive changes (new columns)
/// - PATCH: Bug fixes, documentation
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Metadata key under which tables record their schema version.
pub const SCHEMA_VERSION_KEY: &str = "pitch_path.schema_version";

/// Check if a schema version is compatible with current.
pub fn is_compatible(version: &str) -> bool {
    let major = |v: &str| v.split('.').next().and_then(|s| s.parse::<u32>().ok());
    match (major(SCHEMA_VERSION), major(version)) {
        (Some(current), Some(other)) => current == other,
        _ => false,
    }
}
