//! Joint catalog: capture joint ids to joint names.
//!
//! Long-format capture files identify joints by `joint_type_id`. The catalog
//! is loaded once at startup and handed to the pivot explicitly; nothing in
//! the pipeline reaches for it as global state.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One catalog row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JointEntry {
    pub joint_type_id: i64,
    /// Side-prefixed joint name, e.g. `lKnee`.
    #[serde(alias = "hawkeye")]
    pub name: String,
}

/// Serialized catalog document.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default = "default_version")]
    schema_version: String,
    joints: Vec<JointEntry>,
}

fn default_version() -> String {
    crate::CONFIG_SCHEMA_VERSION.to_string()
}

/// Immutable lookup from joint id to joint name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JointCatalog {
    entries: Vec<JointEntry>,
    by_id: HashMap<i64, usize>,
}

/// Built-in Hawk-Eye style skeleton, in id order.
const BUILTIN_JOINTS: &[&str] = &[
    "head",
    "neck",
    "pelvis",
    "lShoulder",
    "rShoulder",
    "lElbow",
    "rElbow",
    "lWrist",
    "rWrist",
    "lHip",
    "rHip",
    "lKnee",
    "rKnee",
    "lAnkle",
    "rAnkle",
    "lHeel",
    "rHeel",
    "lToe",
    "rToe",
];

impl JointCatalog {
    /// Build a catalog from entries. Duplicate ids keep the first entry;
    /// use [`crate::validate::validate_catalog`] to reject them instead.
    pub fn new(entries: Vec<JointEntry>) -> Self {
        let mut by_id = HashMap::with_capacity(entries.len());
        for (i, e) in entries.iter().enumerate() {
            by_id.entry(e.joint_type_id).or_insert(i);
        }
        Self { entries, by_id }
    }

    /// The default skeleton shipped with the binary (ids start at 1).
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_JOINTS
                .iter()
                .enumerate()
                .map(|(i, name)| JointEntry {
                    joint_type_id: i as i64 + 1,
                    name: (*name).to_string(),
                })
                .collect(),
        )
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Ok(Self::new(file.joints))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, crate::ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| crate::ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| crate::ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&CatalogFile {
            schema_version: default_version(),
            joints: self.entries.clone(),
        })
    }

    /// Joint name for a capture id.
    pub fn name_of(&self, joint_type_id: i64) -> Option<&str> {
        self.by_id
            .get(&joint_type_id)
            .map(|&i| self.entries[i].name.as_str())
    }

    pub fn entries(&self) -> &[JointEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for JointCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
