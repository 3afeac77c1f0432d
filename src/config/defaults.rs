//! Built-in defaults (layer 1)

use serde::{Deserialize, Serialize};

/// Default value for every configuration key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Directory searched for permission files
    pub path: String,

    /// Glob, relative to `path`, selecting candidate files
    pub glob: String,

    /// Workbook written by the run
    pub output: String,

    /// Cell text for a granted permission
    pub true_icon: String,

    /// Cell text for a denied permission
    pub false_icon: String,

    /// Replace API names with labels
    pub use_labels: bool,

    /// Directory holding object and field definitions
    pub object_meta_path: String,

    /// `permissionsets` or `profiles`
    pub entity_type: String,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            path: "./permissionsets".to_string(),
            glob: "**/*-meta.xml".to_string(),
            output: "./sfdocs/permissions.xlsx".to_string(),
            true_icon: "✔".to_string(),
            false_icon: "✖".to_string(),
            use_labels: false,
            object_meta_path: "./objects".to_string(),
            entity_type: "permissionsets".to_string(),
        }
    }
}

impl BuiltinDefaults {
    /// Convert to the JSON shape used by config files
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "path": self.path,
            "glob": self.glob,
            "output": self.output,
            "trueIcon": self.true_icon,
            "falseIcon": self.false_icon,
            "useLabels": self.use_labels,
            "objectMetaPath": self.object_meta_path,
            "type": self.entity_type,
        })
    }
}
