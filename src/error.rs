//! Error types for the versioning engine
//!
//! Every core operation returns [`Result`], whose error is a [`DepotError`].
//! Errors are terminal for the operation that raised them: nothing is retried,
//! and the master record is never touched once an error surfaced.

use crate::artifacts::objects::manifest_id::ManifestId;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DepotError>;

/// Failure categories reported to the command layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    AlreadyExists,
    NotFound,
    InvalidState,
    IoFailure,
    GraphError,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::AlreadyExists => "AlreadyExists",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::InvalidState => "InvalidState",
            ErrorKind::IoFailure => "IOFailure",
            ErrorKind::GraphError => "GraphError",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Error)]
pub enum DepotError {
    #[error("project {0} already exists")]
    AlreadyExists(String),

    #[error("project {0} not found")]
    ProjectNotFound(String),

    #[error("manifest or label {0:?} not found")]
    RevisionNotFound(String),

    #[error("manifest {0} not found")]
    ManifestNotFound(ManifestId),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("I/O failure at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt record at {path:?}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("history graph error: {0}")]
    Graph(String),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl DepotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DepotError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            DepotError::ProjectNotFound(_)
            | DepotError::RevisionNotFound(_)
            | DepotError::ManifestNotFound(_) => ErrorKind::NotFound,
            DepotError::InvalidState(_) => ErrorKind::InvalidState,
            DepotError::Io { .. } | DepotError::Corrupt { .. } | DepotError::Output(_) => {
                ErrorKind::IoFailure
            }
            DepotError::Graph(_) => ErrorKind::GraphError,
        }
    }

    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        DepotError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn corrupt(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        DepotError::Corrupt {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Attach the offending path to a raw I/O result
pub trait IoContext<T> {
    fn at_path(self, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn at_path(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| DepotError::io(path, source))
    }
}
