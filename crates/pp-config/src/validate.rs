//! Semantic validation of configuration.
//!
//! Validation collects every problem instead of stopping at the first, so a
//! user fixing a config file sees the full list in one run.

use crate::joints::JointCatalog;
use crate::pipeline::PipelineConfig;
use pp_common::schema::is_compatible;
use std::collections::HashSet;
use std::fmt;

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub type ValidationResult = Result<(), Vec<ValidationError>>;

fn check_names(field: &str, names: &[String], errors: &mut Vec<ValidationError>) {
    if names.is_empty() {
        errors.push(ValidationError::new(field, "must not be empty"));
    }
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            errors.push(ValidationError::new(field, "contains an empty name"));
        } else if !seen.insert(name.to_ascii_lowercase()) {
            errors.push(ValidationError::new(field, format!("duplicate joint {name}")));
        }
    }
}

/// Validate a pipeline configuration.
pub fn validate_pipeline(config: &PipelineConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if !is_compatible(&config.schema_version) {
        errors.push(ValidationError::new(
            "schema_version",
            format!("unsupported version {}", config.schema_version),
        ));
    }
    if config.window == 0 {
        errors.push(ValidationError::new("window", "must be at least 1"));
    }
    check_names("joints_of_interest", &config.joints_of_interest, &mut errors);
    check_names("arm_joints", &config.arm_joints, &mut errors);
    if config.distance_label.trim().is_empty() {
        errors.push(ValidationError::new("distance_label", "must not be empty"));
    }
    if config.leg_lift_joint.trim().is_empty() {
        errors.push(ValidationError::new("leg_lift_joint", "must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a joint catalog: non-empty, unique ids, unique names.
pub fn validate_catalog(catalog: &JointCatalog) -> ValidationResult {
    let mut errors = Vec::new();
    if catalog.is_empty() {
        errors.push(ValidationError::new("joints", "catalog is empty"));
    }
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for entry in catalog.entries() {
        if !ids.insert(entry.joint_type_id) {
            errors.push(ValidationError::new(
                "joints",
                format!("duplicate joint_type_id {}", entry.joint_type_id),
            ));
        }
        if entry.name.trim().is_empty() {
            errors.push(ValidationError::new(
                "joints",
                format!("joint_type_id {} has an empty name", entry.joint_type_id),
            ));
        } else if !names.insert(entry.name.as_str()) {
            errors.push(ValidationError::new(
                "joints",
                format!("duplicate joint name {}", entry.name),
            ));
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joints::JointEntry;

    #[test]
    fn test_default_pipeline_is_valid() {
        assert!(validate_pipeline(&PipelineConfig::default()).is_ok());
        assert!(validate_catalog(&JointCatalog::builtin()).is_ok());
    }

    #[test]
    fn test_collects_all_problems() {
        let cfg = PipelineConfig {
            window: 0,
            joints_of_interest: vec!["wrist".to_string(), "Wrist".to_string()],
            distance_label: " ".to_string(),
            ..PipelineConfig::default()
        };
        let errors = validate_pipeline(&cfg).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["window", "joints_of_interest", "distance_label"]);
    }

    #[test]
    fn test_rejects_incompatible_schema() {
        let cfg = PipelineConfig {
            schema_version: "2.0.0".to_string(),
            ..PipelineConfig::default()
        };
        let errors = validate_pipeline(&cfg).unwrap_err();
        assert_eq!(errors[0].field, "schema_version");
    }

    #[test]
    fn test_catalog_duplicates_rejected() {
        let catalog = JointCatalog::new(vec![
            JointEntry {
                joint_type_id: 1,
                name: "lKnee".to_string(),
            },
            JointEntry {
                joint_type_id: 1,
                name: "lKnee".to_string(),
            },
        ]);
        let errors = validate_catalog(&catalog).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
