//! Master record
//!
//! The only mutable versioning state of a project: the head manifest, where
//! every manifest of the project is stored, and the labels pointing at them.
//! The record is always rewritten whole.
//!
//! ```text
//! {
//!   "head": 1700000000001,
//!   "manifests": { "1700000000000": "/db/alice/proj/.depot/.manifests/1700000000000.json", ... },
//!   "labels": [{ "label": "v1", "manifestId": 1700000000001 }]
//! }
//! ```

use crate::areas::database::Database;
use crate::artifacts::objects::manifest_id::ManifestId;
use crate::error::{DepotError, IoContext, Result};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub label: String,
    pub manifest_id: ManifestId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterRecord {
    head: Option<ManifestId>,
    manifests: BTreeMap<ManifestId, PathBuf>,
    labels: Vec<Label>,
}

impl MasterRecord {
    pub fn load(database: &Database) -> Result<Self> {
        let master_path = database.master_path();
        let content = std::fs::read(&master_path).at_path(&master_path)?;

        serde_json::from_slice(&content).map_err(|e| DepotError::corrupt(&master_path, e))
    }

    pub fn save(&self, database: &Database) -> Result<()> {
        database.write_record(&database.master_path(), self)
    }

    pub fn head(&self) -> Option<ManifestId> {
        self.head
    }

    pub fn newest(&self) -> Option<ManifestId> {
        self.manifests.keys().next_back().copied()
    }

    pub fn manifest_ids(&self) -> impl Iterator<Item = ManifestId> + '_ {
        self.manifests.keys().copied()
    }

    pub fn location(&self, id: ManifestId) -> Option<&Path> {
        self.manifests.get(&id).map(PathBuf::as_path)
    }

    pub fn contains(&self, id: ManifestId) -> bool {
        self.manifests.contains_key(&id)
    }

    /// Register a freshly written manifest and make it the head
    pub fn record_manifest(&mut self, id: ManifestId, manifest_path: PathBuf) {
        self.manifests.insert(id, manifest_path);
        self.head = Some(id);
    }

    /// Point `label` at a manifest; other labels of the same manifest stay
    pub fn add_label(&mut self, label: &str, id: ManifestId) -> Result<()> {
        if !self.contains(id) {
            return Err(DepotError::ManifestNotFound(id));
        }

        self.labels.push(Label::new(label.to_string(), id));
        Ok(())
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn labels_for(&self, id: ManifestId) -> impl Iterator<Item = &str> {
        self.labels
            .iter()
            .filter(move |label| label.manifest_id == id)
            .map(|label| label.label.as_str())
    }

    /// Resolve a manifest id or a label
    ///
    /// A known label wins over a numeric id with the same spelling. When a
    /// label was added more than once, the latest addition counts.
    pub fn resolve(&self, revision: &str) -> Result<ManifestId> {
        let revision = revision.trim();

        if let Some(label) = self.labels.iter().rev().find(|label| label.label == revision) {
            return Ok(label.manifest_id);
        }

        ManifestId::try_parse(revision)
            .filter(|id| self.contains(*id))
            .ok_or_else(|| DepotError::RevisionNotFound(revision.to_string()))
    }
}
