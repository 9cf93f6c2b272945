use crate::areas::database::Database;
use crate::artifacts::objects::structure_entry::StructureEntry;
use crate::artifacts::snapshot::reader::SnapshotReader;
use crate::artifacts::snapshot::writer::SnapshotWriter;
use std::path::Path;

/// Working tree of a project: the project directory minus its hidden entries
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check the current tree into `database` and return its structure
    pub fn snapshot_into(&self, database: &Database) -> crate::error::Result<Vec<StructureEntry>> {
        SnapshotWriter::new(&self.path, database.path()).snapshot()
    }

    /// Replay `entries` whose artifacts live in `source`
    pub fn restore_from(
        &self,
        source: &Database,
        entries: &[StructureEntry],
    ) -> crate::error::Result<()> {
        SnapshotReader::new(source.path(), &self.path).restore(entries)
    }
}
