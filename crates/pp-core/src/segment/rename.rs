//! Handedness-neutral column names.

use pp_common::SegmentationError;
use std::collections::HashMap;

/// Strip a leading `l`/`r` handedness prefix and lower-case the name.
///
/// The prefix only counts when directly followed by an upper-case letter,
/// so `lWrist_x` becomes `wrist_x` while `release` stays `release`.
pub fn normalize_column_name(name: &str) -> String {
    let mut chars = name.chars();
    let stripped = match (chars.next(), chars.next()) {
        (Some('l' | 'r'), Some(second)) if second.is_uppercase() => &name[1..],
        _ => name,
    };
    stripped.to_lowercase()
}

/// Normalize every joint name, refusing names that collide afterwards.
pub fn normalize_joint_names(joints: &[String]) -> Result<Vec<String>, SegmentationError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    let mut out = Vec::with_capacity(joints.len());
    for joint in joints {
        let normalized = normalize_column_name(joint);
        if let Some(first) = seen.insert(normalized.clone(), joint) {
            return Err(SegmentationError::ColumnCollision {
                first: first.to_string(),
                second: joint.clone(),
                normalized,
            });
        }
        out.push(normalized);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_side_prefix() {
        assert_eq!(normalize_column_name("lWrist_x"), "wrist_x");
        assert_eq!(normalize_column_name("rElbow_z"), "elbow_z");
        assert_eq!(normalize_column_name("rShoulder"), "shoulder");
    }

    #[test]
    fn test_leaves_plain_names() {
        assert_eq!(normalize_column_name("time"), "time");
        assert_eq!(normalize_column_name("release"), "release");
        assert_eq!(normalize_column_name("l"), "l");
        assert_eq!(normalize_column_name(""), "");
        assert_eq!(normalize_column_name("Head"), "head");
    }

    #[test]
    fn test_collision_is_reported() {
        let err = normalize_joint_names(&["lKnee".to_string(), "rKnee".to_string()]).unwrap_err();
        assert_eq!(
            err,
            SegmentationError::ColumnCollision {
                first: "lKnee".to_string(),
                second: "rKnee".to_string(),
                normalized: "knee".to_string(),
            }
        );
    }

    #[test]
    fn test_distinct_names_pass() {
        let names = normalize_joint_names(&["rWrist".to_string(), "lKnee".to_string()]).unwrap();
        assert_eq!(names, vec!["wrist", "knee"]);
    }
}
