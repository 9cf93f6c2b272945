use crate::areas::database::Database;
use crate::areas::project::Project;
use crate::artifacts::merge::ancestry::AncestryResolver;
use crate::artifacts::merge::conflict::{
    ConflictMaterializer, detect_conflicts, resolve_ancestor,
};
use crate::artifacts::objects::manifest::{Manifest, Operation, Parent};
use crate::artifacts::objects::manifest_id::ManifestId;
use crate::error::{DepotError, Result};
use colored::Colorize;
use std::io::Write;
use std::path::Path;

impl Project {
    /// Merge `source_revision` of `source` into `target_revision` of this
    /// project
    ///
    /// Files changed on both sides are replaced in the working tree by their
    /// `_mr`/`_mg`/`_mt` variants. The recorded `merge-out` manifest becomes
    /// the head and stays pending until [`Project::merge_in`].
    pub fn merge_out(
        &self,
        source: &Project,
        source_revision: &str,
        target_revision: &str,
    ) -> Result<Manifest> {
        let source_manifest = source.manifest(source_revision)?;

        let manifest = self.locked(|| {
            let mut master = self.master()?;
            let target_id = master.resolve(target_revision)?;
            let target_manifest = self.database().load_manifest(target_id)?;

            let resolver = AncestryResolver::new(|manifest_dir: &Path, id: ManifestId| {
                Database::read_manifest_in(manifest_dir, id)
                    .map(|manifest| manifest.parents().to_vec())
            });
            let source_chains = resolver
                .ancestor_chains(source_manifest.id, &source.database().manifests_path())?;
            let target_chains =
                resolver.ancestor_chains(target_id, &self.database().manifests_path())?;

            let base_id = self
                .merge_base()
                .merge_base(&source_chains, &target_chains)?;
            let base_dir = source_chains
                .graph()
                .location(base_id)
                .or_else(|| target_chains.graph().location(base_id))
                .ok_or_else(|| {
                    DepotError::Graph(format!("merge base {} was never visited", base_id))
                })?;
            let base_manifest = Database::read_manifest_in(base_dir, base_id)?;
            let ancestor_repo = base_dir.parent().ok_or_else(|| {
                DepotError::Graph(format!("merge base {} has no storage root", base_id))
            })?;

            tracing::info!(
                source = %source_manifest.id,
                target = %target_id,
                base = %base_id,
                strategy = ?self.merge_base(),
                "computed merge base"
            );

            let conflicts = detect_conflicts(&source_manifest, &target_manifest);

            let materializer = ConflictMaterializer::new(
                source.database().path(),
                ancestor_repo,
                self.workspace().path(),
            );
            let bundles = materializer.materialize_all(
                conflicts
                    .iter()
                    .map(|conflict| (conflict, resolve_ancestor(conflict, &base_manifest))),
            )?;

            self.commit_manifest(
                &mut master,
                Operation::MergeOut {
                    parent: [
                        source.parent_link(source_manifest.id),
                        Parent::new(target_id, self.database().manifests_path()),
                    ],
                    structure: bundles,
                },
            )
        })?;

        let bundles = manifest.bundles().unwrap_or_default();
        writeln!(
            self.writer(),
            "Merged {} {} into {} (manifest {}), {} conflict(s)",
            source.display_name().bold(),
            source_manifest.id.to_string().yellow(),
            self.display_name().bold(),
            manifest.id.to_string().yellow(),
            bundles.len()
        )?;
        for bundle in bundles {
            for path in bundle.paths() {
                writeln!(self.writer(), "  {}", path.display().to_string().red())?;
            }
        }

        Ok(manifest)
    }
}
