//! Versioning data structures and algorithms
//!
//! - `objects`: fingerprints, artifact ids, structure entries and manifests
//! - `snapshot`: tree walking, check-in and checkout of working trees
//! - `merge`: ancestry, merge-base search and conflict handling

pub mod merge;
pub mod objects;
pub mod snapshot;
