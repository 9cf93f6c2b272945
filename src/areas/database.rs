//! Project storage
//!
//! Everything a project stores lives under its hidden `.depot` directory:
//!
//! ```text
//! .depot/
//!   .manifests/<id>.json   one manifest per file
//!   .master.json           head, manifest locations and labels
//!   .lock                  advisory lock file
//!   <mirrored tree>/       artifacts, e.g. docs/guide.md/<artifactId>
//! ```
//!
//! Records are written to a temporary file first and renamed into place, so a
//! reader never observes a half-written manifest or master record.

use crate::artifacts::objects::manifest::Manifest;
use crate::artifacts::objects::manifest_id::ManifestId;
use crate::error::{DepotError, IoContext, Result};
use fake::rand;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const STORAGE_DIR: &str = ".depot";
pub const MANIFESTS_DIR: &str = ".manifests";
pub const MASTER_FILE: &str = ".master.json";
pub const LOCK_FILE: &str = ".lock";

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    /// Storage root, also the root of the mirrored artifact tree
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn manifests_path(&self) -> PathBuf {
        self.path.join(MANIFESTS_DIR)
    }

    pub fn master_path(&self) -> PathBuf {
        self.path.join(MASTER_FILE)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.path.join(LOCK_FILE)
    }

    pub fn exists(&self) -> bool {
        self.manifests_path().is_dir()
    }

    pub fn init(&self) -> Result<()> {
        let manifests_path = self.manifests_path();
        std::fs::create_dir_all(&manifests_path).at_path(&manifests_path)
    }

    pub fn manifest_path(&self, id: ManifestId) -> PathBuf {
        self.manifests_path().join(id.to_path())
    }

    /// Persist a manifest; manifests are write-once
    pub fn store_manifest(&self, manifest: &Manifest) -> Result<PathBuf> {
        let manifest_path = self.manifest_path(manifest.id);

        if manifest_path.exists() {
            return Err(DepotError::InvalidState(format!(
                "manifest {} is already stored",
                manifest.id
            )));
        }

        self.write_record(&manifest_path, manifest)?;

        Ok(manifest_path)
    }

    pub fn load_manifest(&self, id: ManifestId) -> Result<Manifest> {
        Self::read_manifest_in(&self.manifests_path(), id)
    }

    /// Read a manifest from any manifest directory, including another
    /// project's
    pub fn read_manifest_in(manifest_dir: &Path, id: ManifestId) -> Result<Manifest> {
        let manifest_path = manifest_dir.join(id.to_path());

        if !manifest_path.is_file() {
            return Err(DepotError::ManifestNotFound(id));
        }

        let content = std::fs::read(&manifest_path).at_path(&manifest_path)?;
        serde_json::from_slice(&content).map_err(|e| DepotError::corrupt(&manifest_path, e))
    }

    /// Serialize a record as JSON and move it into place atomically
    pub fn write_record(&self, record_path: &Path, record: &impl Serialize) -> Result<()> {
        let content =
            serde_json::to_vec_pretty(record).map_err(|e| DepotError::corrupt(record_path, e))?;

        let record_dir = record_path.parent().ok_or_else(|| {
            DepotError::InvalidState(format!("invalid record path {}", record_path.display()))
        })?;
        let temp_record_path = record_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_record_path)
            .at_path(&temp_record_path)?;

        file.write_all(&content).at_path(&temp_record_path)?;
        file.sync_all().at_path(&temp_record_path)?;

        // rename the temp file over the record to make the write atomic
        std::fs::rename(&temp_record_path, record_path).at_path(record_path)?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!(".tmp-record-{}", rand::random::<u32>())
    }
}
