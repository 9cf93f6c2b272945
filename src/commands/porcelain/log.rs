use crate::areas::project::Project;
use crate::artifacts::objects::manifest::Manifest;
use crate::error::Result;
use colored::Colorize;
use std::io::Write;

/// One manifest of a project's history with the labels pointing at it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub manifest: Manifest,
    pub labels: Vec<String>,
    pub is_head: bool,
}

impl Project {
    /// Every manifest of the project, oldest first
    pub fn history(&self) -> Result<Vec<HistoryEntry>> {
        let master = self.master()?;

        master
            .manifest_ids()
            .map(|id| {
                Ok(HistoryEntry {
                    manifest: self.database().load_manifest(id)?,
                    labels: master.labels_for(id).map(str::to_string).collect(),
                    is_head: master.head() == Some(id),
                })
            })
            .collect()
    }

    /// Print the history, newest first
    pub fn log(&self) -> Result<Vec<HistoryEntry>> {
        let history = self.history()?;

        for entry in history.iter().rev() {
            self.show_history_entry(entry)?;
            writeln!(self.writer())?;
        }

        Ok(history)
    }

    fn show_history_entry(&self, entry: &HistoryEntry) -> Result<()> {
        let manifest = &entry.manifest;

        let mut decorations = Vec::new();
        if entry.is_head {
            decorations.push("HEAD".cyan().bold().to_string());
        }
        decorations.extend(entry.labels.iter().map(|label| label.green().to_string()));
        let decoration = if decorations.is_empty() {
            String::new()
        } else {
            format!(" ({})", decorations.join(", "))
        };

        writeln!(
            self.writer(),
            "{}{}",
            format!("manifest {}", manifest.id).yellow(),
            decoration
        )?;
        writeln!(self.writer(), "Command: {}", manifest.command())?;
        writeln!(self.writer(), "User:    {}", manifest.user)?;
        writeln!(
            self.writer(),
            "Date:    {}",
            manifest.datetime.format("%a %b %-d %H:%M:%S %Y %z")
        )?;

        if !manifest.parents().is_empty() {
            let parents = manifest
                .parents()
                .iter()
                .map(|parent| parent.parent_id.to_string())
                .collect::<Vec<_>>();
            writeln!(self.writer(), "Parents: {}", parents.join(" "))?;
        }

        if let Some(from) = manifest.checkout_from_path() {
            writeln!(self.writer(), "From:    {}", from.display())?;
        }

        match manifest.bundles() {
            Some(bundles) => {
                writeln!(self.writer(), "Conflicts: {}", bundles.len())?;
            }
            None => {
                writeln!(self.writer(), "Entries: {}", manifest.entries().len())?;
            }
        }

        Ok(())
    }
}
