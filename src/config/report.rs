//! Validated report settings

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use permsheet_core::IconSet;
use serde::Deserialize;
use serde_json::Value;

use super::effective::ConfigError;

/// Which permission metadata files a run reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    PermissionSets,
    Profiles,
}

impl EntityType {
    /// File name suffix of this entity's source files.
    pub fn suffix(&self) -> &'static str {
        match self {
            EntityType::PermissionSets => ".permissionset-meta.xml",
            EntityType::Profiles => ".profile-meta.xml",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::PermissionSets => "permissionsets",
            EntityType::Profiles => "profiles",
        }
    }

    /// Human-readable name of one file of this type.
    pub fn singular(&self) -> &'static str {
        match self {
            EntityType::PermissionSets => "permission set",
            EntityType::Profiles => "profile",
        }
    }

    /// Sheet base name for a source file: the file name minus the entity
    /// suffix, or minus its extension for any other file.
    ///
    /// The whole `.permissionset-meta.xml` / `.profile-meta.xml` suffix is
    /// stripped, so `Sales.permissionset-meta.xml` gives `Sales`, not
    /// `Sales.permissionset-meta`.
    pub fn base_name(&self, path: &Path) -> String {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match file_name.strip_suffix(self.suffix()) {
            Some(base) => base.to_string(),
            None => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or(file_name),
        }
    }
}

impl FromStr for EntityType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "permissionsets" => Ok(EntityType::PermissionSets),
            "profiles" => Ok(EntityType::Profiles),
            _ => Err(ConfigError::InvalidType(s.to_string())),
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merged configuration as found in files, before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    path: PathBuf,
    glob: String,
    output: PathBuf,
    true_icon: String,
    false_icon: String,
    use_labels: bool,
    object_meta_path: PathBuf,
    #[serde(rename = "type")]
    entity_type: String,
}

/// Settings for one report run.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Directory searched for permission files
    pub path: PathBuf,

    /// Glob relative to `path`, `/`-separated
    pub glob: String,

    /// Workbook to write
    pub output: PathBuf,

    pub icons: IconSet,

    /// Label source directory; `Some` only when labels are requested
    pub label_source: Option<PathBuf>,

    pub entity_type: EntityType,
}

impl ReportConfig {
    /// Validate a merged configuration value.
    ///
    /// Fails on an unknown `type`, a missing `path`, or a missing
    /// `objectMetaPath` when labels are requested.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        let raw = RawConfig::deserialize(value)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        let entity_type: EntityType = raw.entity_type.parse()?;

        if !raw.path.exists() {
            return Err(ConfigError::PathNotFound(raw.path));
        }

        let label_source = if raw.use_labels {
            if !raw.object_meta_path.exists() {
                return Err(ConfigError::LabelSourceNotFound(raw.object_meta_path));
            }
            Some(raw.object_meta_path)
        } else {
            None
        };

        Ok(Self {
            path: raw.path,
            glob: raw.glob.replace('\\', "/"),
            output: raw.output,
            icons: IconSet::new(raw.true_icon, raw.false_icon),
            label_source,
            entity_type,
        })
    }
}
