//! Manifest records
//!
//! A manifest is the immutable record of one versioning operation. Manifests
//! link to their parents and form a DAG rooted at a project's `create`
//! manifest.
//!
//! ## Format
//!
//! One JSON object per file:
//! ```text
//! {
//!   "id": 1700000000000,
//!   "user": "alice",
//!   "repo": "proj",
//!   "datetime": "2024-01-01T12:00:00Z",
//!   "command": "check-in",
//!   "parent": [{ "parentId": 1699999999999, "parentRepoPath": "/db/alice/proj/.depot/.manifests" }],
//!   "structure": [{ "artifactNode": "a.txt/3794-L5.txt", "artifactRelPath": "." }]
//! }
//! ```
//!
//! The number of parents is fixed by the command, which is why each variant of
//! [`Operation`] carries a fixed-size parent array.

use crate::artifacts::merge::conflict::ConflictBundle;
use crate::artifacts::objects::manifest_id::ManifestId;
use crate::artifacts::objects::structure_entry::StructureEntry;
use chrono::{DateTime, Utc};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Link from a manifest to one of its parents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
#[serde(rename_all = "camelCase")]
pub struct Parent {
    pub parent_id: ManifestId,
    /// Manifest directory that holds the parent, possibly in another project
    pub parent_repo_path: PathBuf,
}

/// Operation recorded by a manifest, tagged by its `command`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum Operation {
    Create {
        parent: [Parent; 0],
        structure: Vec<StructureEntry>,
    },
    CheckIn {
        parent: [Parent; 1],
        structure: Vec<StructureEntry>,
    },
    CheckOut {
        parent: [Parent; 1],
        structure: Vec<StructureEntry>,
        #[serde(
            rename = "checkoutFromPath",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        checkout_from_path: Option<PathBuf>,
    },
    /// Source branch head first, target branch head second
    MergeOut {
        parent: [Parent; 2],
        structure: Vec<ConflictBundle>,
    },
    MergeIn {
        parent: [Parent; 1],
        structure: Vec<StructureEntry>,
    },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Create { .. } => "create",
            Operation::CheckIn { .. } => "check-in",
            Operation::CheckOut { .. } => "check-out",
            Operation::MergeOut { .. } => "merge-out",
            Operation::MergeIn { .. } => "merge-in",
        }
    }

    pub fn parents(&self) -> &[Parent] {
        match self {
            Operation::Create { parent, .. } => parent,
            Operation::CheckIn { parent, .. }
            | Operation::CheckOut { parent, .. }
            | Operation::MergeIn { parent, .. } => parent,
            Operation::MergeOut { parent, .. } => parent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Manifest {
    pub id: ManifestId,
    pub user: String,
    #[serde(rename = "repo")]
    pub project: String,
    #[new(value = "Utc::now()")]
    pub datetime: DateTime<Utc>,
    #[serde(flatten)]
    pub operation: Operation,
}

impl Manifest {
    pub fn command(&self) -> &'static str {
        self.operation.name()
    }

    pub fn parents(&self) -> &[Parent] {
        self.operation.parents()
    }

    /// Snapshot entries, empty for `merge-out` which records conflict bundles
    pub fn entries(&self) -> &[StructureEntry] {
        match &self.operation {
            Operation::Create { structure, .. }
            | Operation::CheckIn { structure, .. }
            | Operation::CheckOut { structure, .. }
            | Operation::MergeIn { structure, .. } => structure,
            Operation::MergeOut { .. } => &[],
        }
    }

    /// Conflict bundles of a `merge-out`, `None` for every other command
    pub fn bundles(&self) -> Option<&[ConflictBundle]> {
        match &self.operation {
            Operation::MergeOut { structure, .. } => Some(structure),
            _ => None,
        }
    }

    pub fn checkout_from_path(&self) -> Option<&Path> {
        match &self.operation {
            Operation::CheckOut {
                checkout_from_path, ..
            } => checkout_from_path.as_deref(),
            _ => None,
        }
    }

    /// Find the file entry stored under `file_name` in the `rel_path` directory
    pub fn entry_for(&self, rel_path: &str, file_name: &str) -> Option<&StructureEntry> {
        self.entries().iter().find(|entry| {
            entry.artifact_rel_path == rel_path && entry.file_name() == Some(file_name)
        })
    }
}
