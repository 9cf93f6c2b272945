//! Conflict detection and materialization
//!
//! A conflict is a file slot (directory + original file name) that both sides
//! of a merge hold with a different artifact id. Renames and moves are not
//! tracked, they show up as plain conflicts.
//!
//! Materializing a conflict places three variants next to the target file:
//!
//! - `<name>_mr<ext>`: the source side
//! - `<name>_mg<ext>`: the merge-base (common ancestor) side
//! - `<name>_mt<ext>`: the target's working file, renamed
//!
//! The original name stays absent until the operator recreates it from one of
//! the variants and deletes the variants.

use crate::artifacts::objects::manifest::Manifest;
use crate::artifacts::objects::structure_entry::StructureEntry;
use crate::error::{DepotError, IoContext, Result};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SOURCE_SUFFIX: &str = "_mr";
pub const ANCESTOR_SUFFIX: &str = "_mg";
pub const TARGET_SUFFIX: &str = "_mt";

/// Same slot, different content on both sides
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Conflict {
    pub source: StructureEntry,
    pub target: StructureEntry,
}

impl Conflict {
    pub fn file_name(&self) -> &str {
        self.source.file_name().unwrap_or_default()
    }

    pub fn rel_path(&self) -> &str {
        &self.source.artifact_rel_path
    }
}

/// Three files placed side by side for manual resolution
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
#[serde(rename_all = "camelCase")]
pub struct ConflictBundle {
    pub from_source: PathBuf,
    pub from_ancestor: PathBuf,
    pub from_target: PathBuf,
}

impl ConflictBundle {
    pub fn paths(&self) -> [&Path; 3] {
        [&self.from_source, &self.from_ancestor, &self.from_target]
    }
}

/// Pair every file of `source` with the file `target` holds in the same slot
/// under a different artifact id
pub fn detect_conflicts(source: &Manifest, target: &Manifest) -> Vec<Conflict> {
    source
        .entries()
        .iter()
        .filter_map(|source_entry| {
            let file_name = source_entry.file_name()?;
            let target_entry = target.entry_for(&source_entry.artifact_rel_path, file_name)?;

            (target_entry.artifact_node != source_entry.artifact_node)
                .then(|| Conflict::new(source_entry.clone(), target_entry.clone()))
        })
        .collect()
}

/// Look up the conflicting file inside the merge-base manifest
///
/// `None` means the file did not exist at the merge base.
pub fn resolve_ancestor<'m>(
    conflict: &Conflict,
    merge_base: &'m Manifest,
) -> Option<&'m StructureEntry> {
    merge_base.entry_for(conflict.rel_path(), conflict.file_name())
}

/// `true` iff no variant file of any bundle is still on disk
pub fn is_resolved(bundles: &[ConflictBundle]) -> bool {
    bundles
        .iter()
        .flat_map(|bundle| bundle.paths())
        .all(|path| !path.exists())
}

/// Path of a conflict variant: `dir/name.ext` becomes `dir/name<suffix>.ext`
pub fn variant_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();

    let file_name = match path.extension() {
        Some(extension) => format!("{}{}.{}", stem, suffix, extension.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };

    path.with_file_name(file_name)
}

/// Writes conflict variants into a target working tree
#[derive(Debug, new)]
pub struct ConflictMaterializer<'a> {
    /// Storage root holding the source side's artifacts
    source_repo: &'a Path,
    /// Storage root holding the merge base's artifacts
    ancestor_repo: &'a Path,
    /// Working tree of the merge target
    target_root: &'a Path,
}

impl ConflictMaterializer<'_> {
    /// Locate every input of `conflict` without touching the working tree
    ///
    /// The target's working file must exist (InvalidState otherwise) and the
    /// stored source and ancestor artifacts must be on disk (IOFailure).
    pub fn plan(
        &self,
        conflict: &Conflict,
        ancestor: Option<&StructureEntry>,
    ) -> Result<PlannedConflict> {
        let target_file = self
            .target_root
            .join(conflict.target.directory_path())
            .join(conflict.file_name());

        if !target_file.is_file() {
            return Err(DepotError::InvalidState(format!(
                "conflicting file {}/{} is missing from the working tree",
                conflict.rel_path(),
                conflict.file_name()
            )));
        }

        let source_artifact = self.stored_artifact(self.source_repo, &conflict.source)?;
        let ancestor_artifact = ancestor
            .map(|ancestor| self.stored_artifact(self.ancestor_repo, ancestor))
            .transpose()?;

        let bundle = ConflictBundle::new(
            variant_path(&target_file, SOURCE_SUFFIX),
            variant_path(&target_file, ANCESTOR_SUFFIX),
            variant_path(&target_file, TARGET_SUFFIX),
        );

        Ok(PlannedConflict {
            target_file,
            source_artifact,
            ancestor_artifact,
            bundle,
        })
    }

    pub fn materialize(
        &self,
        conflict: &Conflict,
        ancestor: Option<&StructureEntry>,
    ) -> Result<ConflictBundle> {
        self.plan(conflict, ancestor)?.write()
    }

    /// Materialize a batch of conflicts
    ///
    /// Every conflict is planned before the first variant is written, so a
    /// missing input leaves the working tree untouched.
    pub fn materialize_all<'c>(
        &self,
        conflicts: impl IntoIterator<Item = (&'c Conflict, Option<&'c StructureEntry>)>,
    ) -> Result<Vec<ConflictBundle>> {
        let planned = conflicts
            .into_iter()
            .map(|(conflict, ancestor)| self.plan(conflict, ancestor))
            .collect::<Result<Vec<_>>>()?;

        planned.into_iter().map(PlannedConflict::write).collect()
    }

    fn stored_artifact(&self, repo: &Path, entry: &StructureEntry) -> Result<PathBuf> {
        let artifact = entry
            .artifact_path()
            .map(|artifact_path| repo.join(artifact_path))
            .ok_or_else(|| {
                DepotError::InvalidState(format!(
                    "directory entry {:?} cannot be materialized",
                    entry.artifact_rel_path
                ))
            })?;

        if !artifact.is_file() {
            return Err(DepotError::io(
                &artifact,
                std::io::Error::new(std::io::ErrorKind::NotFound, "stored artifact is missing"),
            ));
        }

        Ok(artifact)
    }
}

/// A conflict whose inputs are all known to exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedConflict {
    target_file: PathBuf,
    source_artifact: PathBuf,
    ancestor_artifact: Option<PathBuf>,
    bundle: ConflictBundle,
}

impl PlannedConflict {
    /// Copy the source and ancestor variants, then rename the target file
    pub fn write(self) -> Result<ConflictBundle> {
        let bundle = self.bundle;

        std::fs::copy(&self.source_artifact, &bundle.from_source).at_path(&self.source_artifact)?;

        match &self.ancestor_artifact {
            Some(ancestor_artifact) => {
                std::fs::copy(ancestor_artifact, &bundle.from_ancestor)
                    .at_path(ancestor_artifact)?;
            }
            None => {
                tracing::debug!(
                    file = %self.target_file.display(),
                    "no merge-base version, writing empty ancestor"
                );
                std::fs::write(&bundle.from_ancestor, b"").at_path(&bundle.from_ancestor)?;
            }
        }

        std::fs::rename(&self.target_file, &bundle.from_target).at_path(&self.target_file)?;

        Ok(bundle)
    }
}
