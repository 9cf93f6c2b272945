//! Command implementations
//!
//! Each versioning operation is implemented as a method on
//! [`Project`](crate::areas::project::Project) in `porcelain`.

pub mod porcelain;
