use crate::areas::master::Label;
use crate::areas::project::Project;
use crate::artifacts::objects::manifest_id::ManifestId;
use crate::error::{DepotError, Result};
use colored::Colorize;
use std::io::Write;

impl Project {
    /// Attach `label` to the manifest `revision` resolves to
    pub fn label(&self, revision: &str, label: &str) -> Result<ManifestId> {
        let label = label.trim();
        if label.is_empty() {
            return Err(DepotError::InvalidState(
                "labels cannot be empty".to_string(),
            ));
        }

        let id = self.locked(|| {
            let mut master = self.master()?;
            let id = master.resolve(revision)?;

            master.add_label(label, id)?;
            master.save(self.database())?;

            Ok(id)
        })?;

        tracing::info!(project = %self.display_name(), manifest = %id, label, "labeled manifest");
        writeln!(
            self.writer(),
            "Labeled {} as {}",
            id.to_string().yellow(),
            label.green()
        )?;

        Ok(id)
    }

    pub fn labels(&self) -> Result<Vec<Label>> {
        Ok(self.master()?.labels().to_vec())
    }
}
