//! Snapshotting working trees
//!
//! - `tree_walker`: lazy depth-first walk that skips hidden entries
//! - `writer`: copies a walked tree into content-addressed storage (check-in)
//! - `reader`: replays recorded structure entries into a working tree (checkout)

pub mod reader;
pub mod tree_walker;
pub mod writer;
