use crate::areas::project::Project;
use crate::artifacts::merge::conflict::is_resolved;
use crate::artifacts::objects::manifest::{Manifest, Operation};
use crate::error::{DepotError, Result};
use colored::Colorize;
use std::io::Write;

impl Project {
    /// Close a pending merge-out once every conflict variant is gone
    pub fn merge_in(&self) -> Result<Manifest> {
        let manifest = self.locked(|| {
            let mut master = self.master()?;
            let head = master.head().ok_or_else(|| {
                DepotError::InvalidState(format!("project {} has no head", self.display_name()))
            })?;
            let head_manifest = self.database().load_manifest(head)?;

            let Some(bundles) = head_manifest.bundles() else {
                return Err(DepotError::InvalidState(format!(
                    "head {} is a {} manifest, not a pending merge-out",
                    head,
                    head_manifest.command()
                )));
            };

            if !is_resolved(bundles) {
                let remaining = bundles
                    .iter()
                    .flat_map(|bundle| bundle.paths())
                    .filter(|path| path.exists())
                    .count();
                return Err(DepotError::InvalidState(format!(
                    "{} conflict file(s) still present, resolve them before merge-in",
                    remaining
                )));
            }

            let structure = self.workspace().snapshot_into(self.database())?;

            self.commit_manifest(
                &mut master,
                Operation::MergeIn {
                    parent: [self.parent_link(head)],
                    structure,
                },
            )
        })?;

        writeln!(
            self.writer(),
            "[{} {}] merge completed",
            self.display_name().bold(),
            manifest.id.to_string().yellow()
        )?;

        Ok(manifest)
    }
}
