//! depot: a file-based version-control engine
//!
//! Projects live under a database root as `<root>/<user>/<project>`. Each
//! check-in copies the working tree into content-addressed storage and records
//! an immutable manifest linked to its parents. Manifests form a DAG that
//! supports checkout across users, labels, and merges with three-way conflict
//! files.
//!
//! - `areas`: project storage, master record and working tree
//! - `artifacts`: fingerprints, manifests, snapshots and merge algorithms
//! - `commands`: the versioning operations
//! - `config`, `logging`, `error`: ambient setup shared with the binary

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
