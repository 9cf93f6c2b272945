//! Structure entries
//!
//! One entry describes one filesystem object inside a snapshot:
//!
//! - directory: `artifactNode = ""`, `artifactRelPath` = mirrored directory
//! - file: `artifactNode = "<fileName>/<artifactId>"`, `artifactRelPath` =
//!   directory that contains the file's leaf folder
//!
//! Relative paths always use `/` and the storage root is written as `.`.

use crate::artifacts::objects::artifact_id::ArtifactId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Relative path of the storage root
pub const ROOT_REL_PATH: &str = ".";

const NODE_SEPARATOR: char = '/';

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureEntry {
    pub artifact_node: String,
    pub artifact_rel_path: String,
}

impl StructureEntry {
    pub fn directory(rel_path: impl Into<String>) -> Self {
        StructureEntry {
            artifact_node: String::new(),
            artifact_rel_path: rel_path.into(),
        }
    }

    pub fn file(file_name: &str, artifact_id: &ArtifactId, rel_path: impl Into<String>) -> Self {
        StructureEntry {
            artifact_node: format!("{}{}{}", file_name, NODE_SEPARATOR, artifact_id),
            artifact_rel_path: rel_path.into(),
        }
    }

    pub fn is_directory(&self) -> bool {
        self.artifact_node.is_empty()
    }

    /// Original file name, `None` for directories
    pub fn file_name(&self) -> Option<&str> {
        if self.is_directory() {
            return None;
        }

        self.artifact_node.split(NODE_SEPARATOR).next()
    }

    /// Artifact id part of the node, `None` for directories
    pub fn artifact_id(&self) -> Option<&str> {
        self.artifact_node
            .split_once(NODE_SEPARATOR)
            .map(|(_, artifact_id)| artifact_id)
    }

    /// Directory this entry lives in, relative to a storage or working root
    pub fn directory_path(&self) -> PathBuf {
        relative_path(&self.artifact_rel_path)
    }

    /// Location of the stored artifact, relative to the storage root
    pub fn artifact_path(&self) -> Option<PathBuf> {
        if self.is_directory() {
            return None;
        }

        Some(
            self.artifact_node
                .split(NODE_SEPARATOR)
                .fold(self.directory_path(), |path, part| path.join(part)),
        )
    }

    /// Location of the restored file, relative to a working root
    pub fn working_path(&self) -> Option<PathBuf> {
        self.file_name()
            .map(|file_name| self.directory_path().join(file_name))
    }
}

/// Turn a `/`-separated relative path into a native path
pub fn relative_path(rel_path: &str) -> PathBuf {
    rel_path
        .split(NODE_SEPARATOR)
        .filter(|part| !part.is_empty() && *part != ROOT_REL_PATH)
        .collect()
}

/// Render a native relative path with `/` separators (`.` for the root)
pub fn rel_path_string(path: &Path) -> String {
    let parts = path
        .components()
        .filter_map(|component| match component {
            std::path::Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>();

    if parts.is_empty() {
        ROOT_REL_PATH.to_string()
    } else {
        parts.join("/")
    }
}
