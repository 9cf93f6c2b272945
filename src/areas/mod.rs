//! Project storage areas
//!
//! - `database`: manifests and records under the hidden `.depot` directory
//! - `master`: head pointer, manifest locations and labels
//! - `project`: one user's project, the entry point of every operation
//! - `sequence`: manifest ids unique across a database root
//! - `workspace`: the project's working tree

pub mod database;
pub mod master;
pub mod project;
pub mod sequence;
pub mod workspace;
