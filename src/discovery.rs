//! Metadata file discovery
//!
//! Walks a directory in file-name order and keeps files whose path relative
//! to the root matches a glob. Walk order is the processing order.

use globset::{GlobBuilder, GlobMatcher};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::EntityType;

/// Errors while discovering files
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("Invalid glob pattern: {0}")]
    GlobError(#[from] globset::Error),

    #[error("Walk error: {0}")]
    WalkError(#[from] walkdir::Error),
}

/// Files under `root` whose `/`-separated relative path matches `pattern`.
///
/// `*` does not cross directory boundaries; `**` does.
pub fn find_files(root: &Path, pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    let matcher = compile(pattern)?;
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()))
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel_path) = entry.path().strip_prefix(root) else {
            continue;
        };
        if matcher.is_match(slash_path(rel_path)) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Permission files of `entity` type under `root` matching `pattern`.
pub fn discover_permission_files(
    root: &Path,
    pattern: &str,
    entity: EntityType,
) -> Result<Vec<PathBuf>, DiscoveryError> {
    let suffix = entity.suffix();
    Ok(find_files(root, pattern)?
        .into_iter()
        .filter(|path| {
            path.file_name()
                .is_some_and(|name| name.to_string_lossy().ends_with(suffix))
        })
        .collect())
}

fn compile(pattern: &str) -> Result<GlobMatcher, globset::Error> {
    Ok(GlobBuilder::new(&pattern.replace('\\', "/"))
        .literal_separator(true)
        .build()?
        .compile_matcher())
}

fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
