//! Check-in path: working tree to content-addressed storage
//!
//! A file `docs/guide.md` is stored as `<storage>/docs/guide.md/<artifactId>`
//! and recorded as `{ artifactNode: "guide.md/<artifactId>", artifactRelPath: "docs" }`.
//! The storage tree only grows: stored artifacts are never deleted or
//! rewritten, and an artifact that already exists is left untouched.

use crate::artifacts::objects::artifact_id::ArtifactId;
use crate::artifacts::objects::structure_entry::{StructureEntry, rel_path_string};
use crate::artifacts::snapshot::tree_walker::{TreeWalker, WalkEntry};
use crate::error::{DepotError, IoContext, Result};
use bytes::Bytes;
use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, new)]
pub struct SnapshotWriter<'a> {
    working_root: &'a Path,
    storage_root: &'a Path,
}

impl SnapshotWriter<'_> {
    /// Copy every visible file into storage and return the structure entries
    ///
    /// Any unreadable file aborts the snapshot. Artifacts copied before the
    /// failure stay in storage, but no entry list is returned for them.
    pub fn snapshot(&self) -> Result<Vec<StructureEntry>> {
        TreeWalker::new(self.working_root)
            .map(|entry| match entry? {
                WalkEntry::Directory { rel_path } => self.store_directory(&rel_path),
                WalkEntry::File { rel_path, path } => self.store_file(&rel_path, &path),
            })
            .collect()
    }

    fn store_directory(&self, rel_path: &Path) -> Result<StructureEntry> {
        let mirrored_dir = self.storage_root.join(rel_path);
        std::fs::create_dir_all(&mirrored_dir).at_path(&mirrored_dir)?;

        Ok(StructureEntry::directory(rel_path_string(rel_path)))
    }

    fn store_file(&self, rel_path: &Path, path: &Path) -> Result<StructureEntry> {
        let file_name = rel_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| {
                DepotError::InvalidState(format!("{} has no file name", rel_path.display()))
            })?;

        let content = Bytes::from(std::fs::read(path).at_path(path)?);
        let artifact_id = ArtifactId::from_content(&content, &file_name);

        let leaf_dir = self.storage_root.join(rel_path);
        std::fs::create_dir_all(&leaf_dir).at_path(&leaf_dir)?;

        let artifact_path = leaf_dir.join(artifact_id.as_ref());
        if artifact_path.exists() {
            tracing::debug!(artifact = %artifact_id, "artifact already stored");
        } else {
            std::fs::write(&artifact_path, &content).at_path(&artifact_path)?;
            tracing::debug!(artifact = %artifact_id, file = %rel_path.display(), "stored artifact");
        }

        let parent_dir = rel_path.parent().map(PathBuf::from).unwrap_or_default();

        Ok(StructureEntry::file(
            &file_name,
            &artifact_id,
            rel_path_string(&parent_dir),
        ))
    }
}
