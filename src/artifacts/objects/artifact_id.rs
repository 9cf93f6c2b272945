//! Artifact identifier
//!
//! Artifacts are named `<fingerprint>-L<length><extension>`, for example
//! `3794-L5.txt`. Embedding the length means files of different length never
//! share a name.

use crate::artifacts::objects::fingerprint::Fingerprint;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(String);

impl ArtifactId {
    /// Build the id of `content` stored under the original `file_name`
    pub fn from_content(content: &[u8], file_name: &str) -> Self {
        Self::from_fingerprint(&Fingerprint::of(content), file_name)
    }

    pub fn from_fingerprint(fingerprint: &Fingerprint, file_name: &str) -> Self {
        ArtifactId(format!(
            "{}-L{}{}",
            fingerprint.sum(),
            fingerprint.length(),
            extension_of(file_name)
        ))
    }
}

/// Extension of a file name including the leading dot, or "" if it has none
pub fn extension_of(file_name: &str) -> &str {
    file_name
        .rfind('.')
        .map(|position| &file_name[position..])
        .unwrap_or_default()
}

impl AsRef<str> for ArtifactId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
