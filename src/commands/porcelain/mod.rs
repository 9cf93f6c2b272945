//! Versioning operations
//!
//! Each operation is a method on [`Project`](crate::areas::project::Project):
//!
//! - `create`: start a project with an empty manifest
//! - `check_in`: snapshot the working tree
//! - `check_out`: replay a manifest, possibly from another user's project
//! - `label`: name a manifest
//! - `merge_out`: merge two heads and materialize conflicts
//! - `merge_in`: close a resolved merge-out
//! - `log`: list a project's manifests
//! - `remove`: delete a project

pub mod check_in;
pub mod check_out;
pub mod create;
pub mod label;
pub mod log;
pub mod merge_in;
pub mod merge_out;
pub mod remove;
