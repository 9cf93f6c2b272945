use crate::error::{DepotError, Result};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, FilterEntry, WalkDir};

/// One visited filesystem object, relative to the walk root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEntry {
    Directory { rel_path: PathBuf },
    File { rel_path: PathBuf, path: PathBuf },
}

impl WalkEntry {
    pub fn rel_path(&self) -> &Path {
        match self {
            WalkEntry::Directory { rel_path } | WalkEntry::File { rel_path, .. } => rel_path,
        }
    }
}

/// Depth-first walk below a root directory
///
/// The root itself is not yielded. Entries whose name starts with `.` are
/// skipped together with their subtrees, which also keeps the walk out of the
/// project's own storage directory.
pub struct TreeWalker {
    root: PathBuf,
    entries: FilterEntry<walkdir::IntoIter, fn(&DirEntry) -> bool>,
}

impl TreeWalker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let entries = WalkDir::new(&root)
            .min_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_entry(is_visible as fn(&DirEntry) -> bool);

        TreeWalker { root, entries }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn classify(&self, entry: DirEntry) -> Result<Option<WalkEntry>> {
        let rel_path = entry
            .path()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .map_err(|_| {
                DepotError::InvalidState(format!(
                    "{} escapes the walk root {}",
                    entry.path().display(),
                    self.root.display()
                ))
            })?;

        let file_type = entry.file_type();
        if file_type.is_dir() {
            Ok(Some(WalkEntry::Directory { rel_path }))
        } else if file_type.is_file() {
            Ok(Some(WalkEntry::File {
                rel_path,
                path: entry.into_path(),
            }))
        } else {
            tracing::warn!(path = %entry.path().display(), "skipping special file");
            Ok(None)
        }
    }
}

impl Iterator for TreeWalker {
    type Item = Result<WalkEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(error) => {
                    let path = error
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    let source = error
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("filesystem loop"));

                    return Some(Err(DepotError::io(path, source)));
                }
            };

            match self.classify(entry) {
                Ok(Some(walked)) => return Some(Ok(walked)),
                Ok(None) => continue,
                Err(error) => return Some(Err(error)),
            }
        }
    }
}

fn is_visible(entry: &DirEntry) -> bool {
    // depth 0 is the root, which may itself live under a hidden directory
    entry.depth() == 0 || !entry.file_name().to_string_lossy().starts_with('.')
}
