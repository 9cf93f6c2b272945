//! Manifest identifier
//!
//! Manifest ids are Unix epoch milliseconds taken when the manifest is written.
//! Larger ids are newer, which the merge-base heuristic relies on.
//!
//! ## Storage
//!
//! Manifests are stored in `.depot/.manifests/<id>.json`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const MANIFEST_EXTENSION: &str = "json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManifestId(u64);

impl ManifestId {
    pub fn new(id: u64) -> Self {
        ManifestId(id)
    }

    /// Derive a fresh id from the wall clock
    ///
    /// The id never goes backwards: when the clock did not move past the
    /// newest known id, the next integer is used instead.
    pub fn next_after(newest: Option<ManifestId>) -> Self {
        let now = chrono::Utc::now().timestamp_millis().max(0) as u64;

        match newest {
            Some(ManifestId(newest)) if newest >= now => ManifestId(newest + 1),
            _ => ManifestId(now),
        }
    }

    pub fn try_parse(id: &str) -> Option<Self> {
        id.trim().parse::<u64>().ok().map(ManifestId)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn to_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.{}", self.0, MANIFEST_EXTENSION))
    }
}

impl std::fmt::Display for ManifestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
