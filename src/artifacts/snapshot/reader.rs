//! Checkout path: recorded structure back into a working tree
//!
//! Every entry recreates its directory, file entries then copy the artifact
//! back under its original file name. Entries are independent of each other,
//! so their order does not matter.

use crate::artifacts::objects::structure_entry::StructureEntry;
use crate::error::{DepotError, IoContext, Result};
use derive_new::new;
use std::path::Path;

#[derive(Debug, new)]
pub struct SnapshotReader<'a> {
    /// Storage root the artifacts are read from
    source_repo: &'a Path,
    /// Working tree the files are written to
    target_root: &'a Path,
}

impl SnapshotReader<'_> {
    pub fn restore(&self, entries: &[StructureEntry]) -> Result<()> {
        entries.iter().try_for_each(|entry| self.restore_entry(entry))
    }

    fn restore_entry(&self, entry: &StructureEntry) -> Result<()> {
        let dir_path = self.target_root.join(entry.directory_path());
        std::fs::create_dir_all(&dir_path).at_path(&dir_path)?;

        let (Some(artifact_path), Some(working_path)) = (entry.artifact_path(), entry.working_path())
        else {
            return Ok(());
        };

        let artifact_path = self.source_repo.join(artifact_path);
        if !artifact_path.is_file() {
            return Err(DepotError::io(
                &artifact_path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "artifact is missing"),
            ));
        }

        let working_path = self.target_root.join(working_path);
        std::fs::copy(&artifact_path, &working_path).at_path(&working_path)?;
        tracing::debug!(file = %working_path.display(), "restored file");

        Ok(())
    }
}
