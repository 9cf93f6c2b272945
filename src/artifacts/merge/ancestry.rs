//! Ancestry resolution
//!
//! Walks manifests backwards through their `parent` links and records every
//! linear ancestry implied by the graph. A `merge-out` manifest has two
//! parents, so the walk forks there: the primary parent continues the current
//! path, the secondary parent starts a new path that shares the prefix walked
//! so far. Forks are handled with a work queue, no recursion and no shared
//! accumulator between paths.
//!
//! ```text
//!   A <- B <- C            chains from C: [C, B, A]
//!         \
//!          D <- M(C, D)    chains from M: [M, C, B, A], [M, D, B, A]
//! ```

use crate::artifacts::objects::manifest::Parent;
use crate::artifacts::objects::manifest_id::ManifestId;
use crate::error::{DepotError, Result};
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

/// One visited manifest: its parents and the directory it was read from
#[derive(Debug, Clone, PartialEq, Eq)]
struct GraphNode {
    parents: Vec<ManifestId>,
    links: Vec<Parent>,
    manifest_dir: PathBuf,
}

/// Every manifest touched by one or more ancestry walks
///
/// A manifest id names one manifest in one manifest directory. Meeting the
/// same id in a second directory is a GraphError, never a shared ancestor.
#[derive(Debug, Clone, Default)]
pub struct ManifestGraph {
    nodes: HashMap<ManifestId, GraphNode>,
}

impl ManifestGraph {
    /// Manifest directory a manifest was loaded from
    pub fn location(&self, id: ManifestId) -> Option<&Path> {
        self.nodes.get(&id).map(|node| node.manifest_dir.as_path())
    }

    pub fn parents(&self, id: ManifestId) -> &[ManifestId] {
        self.nodes
            .get(&id)
            .map(|node| node.parents.as_slice())
            .unwrap_or_default()
    }

    /// Fail when an id of `other` was loaded from another directory than here
    pub fn ensure_compatible(&self, other: &ManifestGraph) -> Result<()> {
        for (id, node) in &other.nodes {
            self.ensure_location(*id, &node.manifest_dir)?;
        }
        Ok(())
    }

    /// Union with another graph
    pub fn extend(&mut self, other: &ManifestGraph) -> Result<()> {
        self.ensure_compatible(other)?;
        for (id, node) in &other.nodes {
            self.nodes.entry(*id).or_insert_with(|| node.clone());
        }
        Ok(())
    }

    fn ensure_location(&self, id: ManifestId, manifest_dir: &Path) -> Result<()> {
        match self.nodes.get(&id) {
            Some(node) if node.manifest_dir != manifest_dir => Err(DepotError::Graph(format!(
                "manifest id {} is used in both {} and {}",
                id,
                node.manifest_dir.display(),
                manifest_dir.display()
            ))),
            _ => Ok(()),
        }
    }

    fn visit<Loader>(
        &mut self,
        id: ManifestId,
        manifest_dir: &Path,
        loader: &Loader,
    ) -> Result<Vec<Parent>>
    where
        Loader: Fn(&Path, ManifestId) -> Result<Vec<Parent>>,
    {
        self.ensure_location(id, manifest_dir)?;
        if let Some(node) = self.nodes.get(&id) {
            return Ok(node.links.clone());
        }

        let links = loader(manifest_dir, id)?;
        self.nodes.insert(
            id,
            GraphNode {
                parents: links.iter().map(|parent| parent.parent_id).collect(),
                links: links.clone(),
                manifest_dir: manifest_dir.to_path_buf(),
            },
        );

        Ok(links)
    }
}

/// All root-to-start linear ancestries of one manifest, start first
#[derive(Debug, Clone)]
pub struct AncestorChains {
    start: ManifestId,
    paths: Vec<Vec<ManifestId>>,
    graph: ManifestGraph,
}

impl AncestorChains {
    pub fn start(&self) -> ManifestId {
        self.start
    }

    pub fn paths(&self) -> &[Vec<ManifestId>] {
        &self.paths
    }

    pub fn graph(&self) -> &ManifestGraph {
        &self.graph
    }
}

/// Computes ancestor chains over manifests read through a loader
///
/// The loader receives a manifest directory and an id and returns that
/// manifest's parents, which keeps the walk independent of the storage.
pub struct AncestryResolver<Loader>
where
    Loader: Fn(&Path, ManifestId) -> Result<Vec<Parent>>,
{
    loader: Loader,
}

impl<Loader> AncestryResolver<Loader>
where
    Loader: Fn(&Path, ManifestId) -> Result<Vec<Parent>>,
{
    pub fn new(loader: Loader) -> Self {
        Self { loader }
    }

    pub fn ancestor_chains(&self, start: ManifestId, manifest_dir: &Path) -> Result<AncestorChains> {
        let mut graph = ManifestGraph::default();
        let mut paths = Vec::new();
        let mut queue = VecDeque::from([(start, manifest_dir.to_path_buf(), Vec::new(), HashSet::new())]);

        while let Some((mut id, mut dir, mut path, mut seen)) = queue.pop_front() {
            loop {
                if !seen.insert(id) {
                    return Err(DepotError::Graph(format!(
                        "manifest {} is its own ancestor",
                        id
                    )));
                }
                path.push(id);

                let parents = graph.visit(id, &dir, &self.loader)?;
                let Some((primary, others)) = parents.split_first() else {
                    break;
                };

                for other in others {
                    queue.push_back((
                        other.parent_id,
                        other.parent_repo_path.clone(),
                        path.clone(),
                        seen.clone(),
                    ));
                }

                id = primary.parent_id;
                dir = primary.parent_repo_path.clone();
            }

            debug_log!(chain = ?path, "completed ancestor chain");
            paths.push(path);
        }

        Ok(AncestorChains { start, paths, graph })
    }
}

/// Merge base of two chain sets: for every pair of paths take the first id of
/// the source path that also occurs in the target path, then keep the largest
/// of those candidates
///
/// Larger ids are newer, so this favours the most recent shared manifest. It is
/// a heuristic and can choose a base on the wrong branch when a graph has
/// several merge points.
pub fn merge_base_of_paths(
    source_paths: &[Vec<ManifestId>],
    target_paths: &[Vec<ManifestId>],
) -> Option<ManifestId> {
    let target_sets = target_paths
        .iter()
        .map(|path| path.iter().copied().collect::<HashSet<_>>())
        .collect::<Vec<_>>();

    source_paths
        .iter()
        .flat_map(|source_path| {
            target_sets.iter().filter_map(move |target_set| {
                source_path
                    .iter()
                    .find(|id| target_set.contains(id))
                    .copied()
            })
        })
        .max()
}

/// [`merge_base_of_paths`] over two computed chain sets
pub fn merge_base(source: &AncestorChains, target: &AncestorChains) -> Result<ManifestId> {
    source.graph().ensure_compatible(target.graph())?;

    merge_base_of_paths(source.paths(), target.paths()).ok_or_else(|| {
        DepotError::Graph(format!(
            "manifests {} and {} share no ancestor",
            source.start(),
            target.start()
        ))
    })
}
