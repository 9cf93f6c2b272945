//! Best common ancestor finder
//!
//! An exact alternative to the max-id merge-base heuristic. It finds the
//! common ancestors of two manifests and keeps one that is not an ancestor of
//! any other common ancestor.
//!
//! ## Algorithm Overview
//!
//! ### Phase 1: Find All Common Ancestors
//!
//! Both manifests are walked at once, newest id first:
//! - Mark manifests as visited from the source or the target side
//! - A manifest visited from both sides is a common ancestor
//! - Parents of a common ancestor are marked STALE to prune the search
//!
//! ### Phase 2: Filter to Best Common Ancestors
//!
//! > A best common ancestor of X and Y is any common ancestor of X and Y
//! > that is not an ancestor of any other common ancestor.
//!
//! Manifest ids are time-derived, so the id doubles as the walk's timestamp.

use crate::artifacts::objects::manifest_id::ManifestId;
use bitflags::bitflags;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const VISITED_FROM_SOURCE = 0b01;
        const VISITED_FROM_TARGET = 0b10;
        const VISITED_FROM_BOTH = Self::VISITED_FROM_SOURCE.bits() | Self::VISITED_FROM_TARGET.bits();
        const STALE = 0b100;
        const RESULT = 0b1000;
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_SOURCE) {
            flags.push("SOURCE");
        }
        if self.contains(VisitState::VISITED_FROM_TARGET) {
            flags.push("TARGET");
        }
        if self.contains(VisitState::STALE) {
            flags.push("STALE");
        }
        if self.contains(VisitState::RESULT) {
            flags.push("RESULT");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

/// Parents of one manifest as needed by the walk
#[derive(Debug, Clone, Copy)]
pub struct SlimManifest<'g> {
    pub id: ManifestId,
    pub parents: &'g [ManifestId],
}

#[derive(Debug, Clone)]
struct CommonAncestorsFinder<'g, ManifestLoaderFn>
where
    ManifestLoaderFn: Fn(ManifestId) -> SlimManifest<'g>,
{
    manifest_loader: ManifestLoaderFn,
    _marker: std::marker::PhantomData<&'g ()>,
}

impl<'g, ManifestLoaderFn> CommonAncestorsFinder<'g, ManifestLoaderFn>
where
    ManifestLoaderFn: Fn(ManifestId) -> SlimManifest<'g>,
{
    fn new(manifest_loader: ManifestLoaderFn) -> Self {
        Self {
            manifest_loader,
            _marker: std::marker::PhantomData,
        }
    }

    /// Visit states of every common ancestor of `source_id` and `target_ids`
    /// that was not pruned as stale
    fn find_common_ancestors(
        &self,
        source_id: ManifestId,
        target_ids: &HashSet<ManifestId>,
    ) -> HashMap<ManifestId, VisitState> {
        if target_ids.contains(&source_id) {
            return HashMap::from([(source_id, VisitState::RESULT)]);
        }

        let mut ancestors_states = HashMap::<ManifestId, VisitState>::new();
        let mut priority_queue = BinaryHeap::new();

        ancestors_states.insert(source_id, VisitState::VISITED_FROM_SOURCE);
        priority_queue.push(source_id);

        for &target_id in target_ids {
            ancestors_states.insert(target_id, VisitState::VISITED_FROM_TARGET);
            priority_queue.push(target_id);
        }

        while let Some(manifest_id) = priority_queue.pop() {
            let current_state = ancestors_states
                .get(&manifest_id)
                .copied()
                .unwrap_or(VisitState::NONE);

            debug_log!(manifest = %manifest_id, state = ?current_state, "processing manifest");

            if current_state.contains(VisitState::STALE) {
                continue;
            }

            let is_common_ancestor = if current_state.contains(VisitState::VISITED_FROM_BOTH) {
                ancestors_states
                    .entry(manifest_id)
                    .and_modify(|state| *state |= VisitState::RESULT);
                true
            } else {
                false
            };

            let current = (self.manifest_loader)(manifest_id);

            for &parent_id in current.parents {
                let parent_state = ancestors_states
                    .get(&parent_id)
                    .copied()
                    .unwrap_or(VisitState::NONE);

                let mut new_state = parent_state | current_state;
                if is_common_ancestor {
                    new_state |= VisitState::STALE;
                }

                if !parent_state.contains(current_state) {
                    ancestors_states.insert(parent_id, new_state);
                    priority_queue.push(parent_id);
                }
            }
        }

        ancestors_states
            .into_iter()
            .filter(|(_, state)| {
                !state.contains(VisitState::STALE) && state.contains(VisitState::RESULT)
            })
            .collect()
    }
}

pub struct BCAFinder<'g, ManifestLoaderFn>
where
    ManifestLoaderFn: Fn(ManifestId) -> SlimManifest<'g>,
{
    inner: CommonAncestorsFinder<'g, ManifestLoaderFn>,
}

impl<'g, ManifestLoaderFn> BCAFinder<'g, ManifestLoaderFn>
where
    ManifestLoaderFn: Fn(ManifestId) -> SlimManifest<'g>,
{
    /// The loader must return empty parents for root manifests
    pub fn new(manifest_loader: ManifestLoaderFn) -> Self {
        Self {
            inner: CommonAncestorsFinder::new(manifest_loader),
        }
    }

    /// Finds a best common ancestor of two manifests
    ///
    /// ```rust,ignore
    /// // A <- B <- C
    /// //       \
    /// //        D
    /// let bca = finder.find_best_common_ancestor(c, d);
    /// assert_eq!(bca, Some(b));
    /// ```
    ///
    /// When several best common ancestors exist (criss-cross merges) the
    /// newest one is returned.
    pub fn find_best_common_ancestor(
        &self,
        source_id: ManifestId,
        target_id: ManifestId,
    ) -> Option<ManifestId> {
        let common_ancestors = self
            .inner
            .find_common_ancestors(source_id, &HashSet::from([target_id]))
            .into_keys()
            .collect::<HashSet<_>>();

        if common_ancestors.is_empty() {
            return None;
        }

        debug_log!(ancestors = ?common_ancestors, "found common ancestors");

        let mut redundant_ancestors = HashSet::<ManifestId>::new();
        for &candidate in &common_ancestors {
            if redundant_ancestors.contains(&candidate) {
                continue;
            }

            let others = common_ancestors
                .iter()
                .copied()
                .filter(|other| *other != candidate && !redundant_ancestors.contains(other))
                .collect::<HashSet<_>>();
            let common_states = self.inner.find_common_ancestors(candidate, &others);

            if common_states
                .get(&candidate)
                .unwrap_or(&VisitState::NONE)
                .contains(VisitState::VISITED_FROM_TARGET)
            {
                redundant_ancestors.insert(candidate);
            }

            for other in others {
                if common_states
                    .get(&other)
                    .unwrap_or(&VisitState::NONE)
                    .contains(VisitState::VISITED_FROM_SOURCE)
                {
                    redundant_ancestors.insert(other);
                }
            }
        }

        debug_log!(redundant = ?redundant_ancestors, "filtered redundant ancestors");

        common_ancestors
            .into_iter()
            .filter(|id| !redundant_ancestors.contains(id))
            .max()
    }
}
