use crate::areas::project::Project;
use crate::error::{DepotError, IoContext, Result};
use colored::Colorize;
use std::io::Write;

impl Project {
    /// Delete the project's working tree together with its storage
    pub fn remove(&self) -> Result<()> {
        if !self.exists() {
            return Err(DepotError::ProjectNotFound(self.display_name()));
        }

        self.locked(|| std::fs::remove_dir_all(self.path()).at_path(self.path()))?;

        tracing::info!(project = %self.display_name(), "removed project");
        writeln!(self.writer(), "Removed project {}", self.display_name().bold())?;

        Ok(())
    }
}
