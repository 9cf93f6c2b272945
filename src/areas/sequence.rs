//! Root-wide manifest id sequence
//!
//! Projects under one database root link to each other's manifests, so a
//! manifest id has to be unique across the whole root, not only inside one
//! project. The last id handed out is kept in `<root>/.manifest-sequence`,
//! which is read and rewritten under an exclusive lock on the file itself.

use crate::artifacts::objects::manifest_id::ManifestId;
use crate::error::{DepotError, IoContext, Result};
use derive_new::new;
use file_guard::Lock;
use std::io::{Read, Seek, SeekFrom, Write};
use std::ops::DerefMut;
use std::path::Path;

pub const SEQUENCE_FILE: &str = ".manifest-sequence";

#[derive(Debug, Clone, new)]
pub struct ManifestSequence {
    path: Box<Path>,
}

impl ManifestSequence {
    pub fn at_root(root: &Path) -> Self {
        ManifestSequence::new(root.join(SEQUENCE_FILE).into_boxed_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last id handed out under this root
    pub fn last(&self) -> Result<Option<ManifestId>> {
        if !self.path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path).at_path(&self.path)?;
        self.parse(&content)
    }

    /// Hand out an id newer than the last one issued under this root and newer
    /// than `floor`
    pub fn next(&self, floor: Option<ManifestId>) -> Result<ManifestId> {
        if let Some(root) = self.path.parent() {
            std::fs::create_dir_all(root).at_path(root)?;
        }

        let mut sequence_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .at_path(&self.path)?;
        let mut lock =
            file_guard::lock(&mut sequence_file, Lock::Exclusive, 0, 1).at_path(&self.path)?;
        let file = lock.deref_mut();

        let mut content = String::new();
        file.read_to_string(&mut content).at_path(&self.path)?;
        let last = self.parse(&content)?;

        let id = ManifestId::next_after(last.max(floor));

        file.seek(SeekFrom::Start(0)).at_path(&self.path)?;
        file.set_len(0).at_path(&self.path)?;
        file.write_all(id.to_string().as_bytes()).at_path(&self.path)?;
        file.sync_all().at_path(&self.path)?;

        Ok(id)
    }

    fn parse(&self, content: &str) -> Result<Option<ManifestId>> {
        if content.trim().is_empty() {
            return Ok(None);
        }

        ManifestId::try_parse(content).map(Some).ok_or_else(|| {
            DepotError::InvalidState(format!(
                "{} does not hold a manifest id",
                self.path.display()
            ))
        })
    }
}
