use crate::areas::database::{Database, STORAGE_DIR};
use crate::areas::master::MasterRecord;
use crate::areas::sequence::ManifestSequence;
use crate::areas::workspace::Workspace;
use crate::artifacts::merge::MergeBaseStrategy;
use crate::artifacts::objects::manifest::{Manifest, Operation, Parent};
use crate::artifacts::objects::manifest_id::ManifestId;
use crate::error::{DepotError, IoContext, Result};
use file_guard::Lock;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// One user's project: `<root>/<user>/<project>`
///
/// Every versioning operation goes through a `Project`. Mutating operations
/// run under an exclusive advisory lock on the project's lock file and only
/// touch the master record after the new manifest has been written.
pub struct Project {
    root: Box<Path>,
    user: String,
    name: String,
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
    sequence: ManifestSequence,
    merge_base: MergeBaseStrategy,
}

impl Project {
    pub fn new(
        root: &Path,
        user: &str,
        name: &str,
        writer: Box<dyn std::io::Write>,
    ) -> Result<Self> {
        for part in [user, name] {
            if !is_valid_name(part)? {
                return Err(DepotError::InvalidState(format!(
                    "{:?} is not a valid user or project name",
                    part
                )));
            }
        }

        // recorded paths must not depend on the working directory
        let root = absolute_root(root)?;
        let path = root.join(user).join(name);
        let database = Database::new(path.join(STORAGE_DIR).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let sequence = ManifestSequence::at_root(&root);

        Ok(Project {
            root: root.into_boxed_path(),
            user: user.to_string(),
            name: name.to_string(),
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            workspace,
            sequence,
            merge_base: MergeBaseStrategy::default(),
        })
    }

    pub fn with_merge_base(mut self, merge_base: MergeBaseStrategy) -> Self {
        self.merge_base = merge_base;
        self
    }

    /// Absolute database root the project lives under
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `user/project`, as shown to the operator
    pub fn display_name(&self) -> String {
        format!("{}/{}", self.user, self.name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn merge_base(&self) -> MergeBaseStrategy {
        self.merge_base
    }

    pub fn exists(&self) -> bool {
        self.database.exists() && self.database.master_path().is_file()
    }

    /// Master record of an existing project
    pub fn master(&self) -> Result<MasterRecord> {
        if !self.exists() {
            return Err(DepotError::ProjectNotFound(self.display_name()));
        }

        MasterRecord::load(&self.database)
    }

    pub fn head(&self) -> Result<ManifestId> {
        self.master()?.head().ok_or_else(|| {
            DepotError::InvalidState(format!("project {} has no head", self.display_name()))
        })
    }

    pub fn head_manifest(&self) -> Result<Manifest> {
        self.database.load_manifest(self.head()?)
    }

    /// Manifest by id or label
    pub fn manifest(&self, revision: &str) -> Result<Manifest> {
        let id = self.master()?.resolve(revision)?;
        self.database.load_manifest(id)
    }

    /// Link to one of this project's manifests, as stored in a child manifest
    pub fn parent_link(&self, id: ManifestId) -> Parent {
        Parent::new(id, self.database.manifests_path())
    }

    /// Run `action` while holding the project's exclusive lock
    pub(crate) fn locked<T>(&self, action: impl FnOnce() -> Result<T>) -> Result<T> {
        if !self.database.exists() {
            return Err(DepotError::ProjectNotFound(self.display_name()));
        }

        let lock_path = self.database.lock_path();
        let mut lock_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .at_path(&lock_path)?;

        let _lock = file_guard::lock(&mut lock_file, Lock::Exclusive, 0, 1).at_path(&lock_path)?;

        action()
    }

    /// Write a new manifest for `operation` and make it the head
    ///
    /// The id is derived from the clock but is always larger than every id
    /// already issued under the database root, every id known to the project
    /// and every parent id.
    pub(crate) fn commit_manifest(
        &self,
        master: &mut MasterRecord,
        operation: Operation,
    ) -> Result<Manifest> {
        let newest = operation
            .parents()
            .iter()
            .map(|parent| parent.parent_id)
            .chain(master.newest())
            .max();
        let id = self.sequence.next(newest)?;

        let manifest = Manifest::new(id, self.user.clone(), self.name.clone(), operation);
        let manifest_path = self.database.store_manifest(&manifest)?;

        master.record_manifest(id, manifest_path);
        master.save(&self.database)?;

        tracing::info!(
            project = %self.display_name(),
            manifest = %id,
            command = manifest.command(),
            "recorded manifest"
        );

        Ok(manifest)
    }
}

/// Absolute form of `root`, with its existing prefix resolved through symlinks
fn absolute_root(root: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(root).at_path(root)?;
    let Some(existing) = absolute.ancestors().find(|ancestor| ancestor.exists()) else {
        return Ok(absolute);
    };

    let resolved = existing.canonicalize().at_path(existing)?;
    match absolute.strip_prefix(existing) {
        Ok(rest) if !rest.as_os_str().is_empty() => Ok(resolved.join(rest)),
        _ => Ok(resolved),
    }
}

/// Names that would escape the user directory or collide with bookkeeping
pub const INVALID_NAME_REGEX: &str = r"^\.|[/\\\x00-\x1f\x7f]";

fn is_valid_name(name: &str) -> Result<bool> {
    if name.is_empty() {
        return Ok(false);
    }

    let re = regex::Regex::new(INVALID_NAME_REGEX).map_err(|error| {
        DepotError::InvalidState(format!("invalid name pattern {INVALID_NAME_REGEX}: {error}"))
    })?;

    Ok(!re.is_match(name))
}
