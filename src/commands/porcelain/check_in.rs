use crate::areas::project::Project;
use crate::artifacts::objects::manifest::{Manifest, Operation};
use crate::error::DepotError;
use colored::Colorize;
use std::io::Write;

impl Project {
    /// Snapshot the working tree on top of the current head
    pub fn check_in(&self) -> crate::error::Result<Manifest> {
        let manifest = self.locked(|| {
            let mut master = self.master()?;
            let head = master.head().ok_or_else(|| {
                DepotError::InvalidState(format!("project {} has no head", self.display_name()))
            })?;

            // nothing is recorded unless the whole tree was copied
            let structure = self.workspace().snapshot_into(self.database())?;

            self.commit_manifest(
                &mut master,
                Operation::CheckIn {
                    parent: [self.parent_link(head)],
                    structure,
                },
            )
        })?;

        writeln!(
            self.writer(),
            "[{} {}] checked in {} entries",
            self.display_name().bold(),
            manifest.id.to_string().yellow(),
            manifest.entries().len()
        )?;

        Ok(manifest)
    }
}
