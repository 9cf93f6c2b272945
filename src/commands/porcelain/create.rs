use crate::areas::master::MasterRecord;
use crate::areas::project::Project;
use crate::artifacts::objects::manifest::Operation;
use crate::artifacts::objects::manifest_id::ManifestId;
use crate::error::{DepotError, Result};
use colored::Colorize;
use std::io::Write;

impl Project {
    /// Start a project with an empty, parentless manifest
    pub fn create(&self) -> Result<ManifestId> {
        if self.database().path().exists() {
            return Err(DepotError::AlreadyExists(self.display_name()));
        }

        self.database().init()?;

        let manifest = self.locked(|| {
            let mut master = MasterRecord::default();
            self.commit_manifest(
                &mut master,
                Operation::Create {
                    parent: [],
                    structure: vec![],
                },
            )
        })?;

        writeln!(
            self.writer(),
            "Created project {} at {} (manifest {})",
            self.display_name().bold(),
            self.path().display(),
            manifest.id.to_string().yellow()
        )?;

        Ok(manifest.id)
    }
}
