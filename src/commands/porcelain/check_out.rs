use crate::areas::master::MasterRecord;
use crate::areas::project::Project;
use crate::artifacts::objects::manifest::{Manifest, Operation};
use crate::error::{DepotError, Result};
use colored::Colorize;
use std::io::Write;

impl Project {
    /// Replay a manifest of `source` into this project's working tree
    ///
    /// The source may be this project or another user's. Files already present
    /// in the working tree are overwritten when the manifest holds them and
    /// kept otherwise; the resulting tree is checked in as a `check-out`
    /// manifest whose parent is the replayed manifest. A project without
    /// storage gets one. A `merge-out` manifest records conflict files rather
    /// than a tree and cannot be checked out.
    pub fn check_out(&self, source: &Project, revision: &str) -> Result<Manifest> {
        let source_manifest = source.manifest(revision)?;
        if source_manifest.bundles().is_some() {
            return Err(DepotError::InvalidState(format!(
                "manifest {} is a pending {} and holds no tree to check out",
                source_manifest.id,
                source_manifest.command()
            )));
        }

        if !self.database().exists() {
            self.database().init()?;
        }

        let manifest = self.locked(|| {
            let mut master = if self.database().master_path().is_file() {
                self.master()?
            } else {
                MasterRecord::default()
            };

            self.workspace()
                .restore_from(source.database(), source_manifest.entries())?;
            let structure = self.workspace().snapshot_into(self.database())?;

            self.commit_manifest(
                &mut master,
                Operation::CheckOut {
                    parent: [source.parent_link(source_manifest.id)],
                    structure,
                    checkout_from_path: Some(source.path().to_path_buf()),
                },
            )
        })?;

        writeln!(
            self.writer(),
            "Checked out {} {} into {} (manifest {})",
            source.display_name().bold(),
            source_manifest.id.to_string().yellow(),
            self.display_name().bold(),
            manifest.id.to_string().yellow()
        )?;

        Ok(manifest)
    }
}
