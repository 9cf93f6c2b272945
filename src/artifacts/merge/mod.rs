//! Merge support
//!
//! - `ancestry`: ancestor chains and the max-id merge-base heuristic
//! - `bca_finder`: exact best-common-ancestor search
//! - `conflict`: conflict detection and `_mr`/`_mg`/`_mt` materialization

/// Debug tracing for merge-base finding, enabled with the `debug_merge` feature
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            tracing::debug!($($arg)*);
        }
    };
}

pub mod ancestry;
pub mod bca_finder;
pub mod conflict;

use crate::artifacts::merge::ancestry::AncestorChains;
use crate::artifacts::merge::bca_finder::{BCAFinder, SlimManifest};
use crate::artifacts::objects::manifest_id::ManifestId;
use crate::error::{DepotError, Result};
use std::str::FromStr;

/// How `merge-out` picks the common ancestor of source and target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum MergeBaseStrategy {
    /// Largest of the first shared ids per pair of ancestor chains
    #[default]
    FirstCommonMax,
    /// Common ancestor that is not an ancestor of another common ancestor
    BestCommonAncestor,
}

impl MergeBaseStrategy {
    pub fn merge_base(&self, source: &AncestorChains, target: &AncestorChains) -> Result<ManifestId> {
        match self {
            MergeBaseStrategy::FirstCommonMax => ancestry::merge_base(source, target),
            MergeBaseStrategy::BestCommonAncestor => {
                let mut graph = source.graph().clone();
                graph.extend(target.graph())?;

                BCAFinder::new(|id| SlimManifest {
                    id,
                    parents: graph.parents(id),
                })
                .find_best_common_ancestor(source.start(), target.start())
                .ok_or_else(|| {
                    DepotError::Graph(format!(
                        "manifests {} and {} share no ancestor",
                        source.start(),
                        target.start()
                    ))
                })
            }
        }
    }
}

impl FromStr for MergeBaseStrategy {
    type Err = DepotError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim() {
            "first-common-max" => Ok(MergeBaseStrategy::FirstCommonMax),
            "best-common-ancestor" => Ok(MergeBaseStrategy::BestCommonAncestor),
            other => Err(DepotError::InvalidState(format!(
                "unknown merge-base strategy {:?}",
                other
            ))),
        }
    }
}
