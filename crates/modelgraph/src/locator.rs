//! Source locator: walks a workspace and yields candidate source files.
//!
//! Traversal is recursive and sorted by file name, so unchanged trees always
//! yield the same sequence. Dependency, build and generated-asset
//! directories are pruned together with every dot-prefixed entry.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, warn};
use walkdir::{DirEntry, FilterEntry, WalkDir};

use crate::{config::ScanConfig, error::ScanError};

/// Directory names that never contain application models.
pub const EXCLUDED_DIRS: &[&str] = &[
    "vendor",
    "node_modules",
    "storage",
    "bootstrap",
    "public",
    "build",
    "dist",
];

type EntryFilter = Box<dyn FnMut(&DirEntry) -> bool>;

/// Locates candidate source files below a root directory.
#[derive(Debug, Clone)]
pub struct SourceLocator {
    root: PathBuf,
    extension: String,
    excluded_dirs: Vec<String>,
}

impl SourceLocator {
    /// Creates a locator for `.php` files below `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extension: "php".to_string(),
            excluded_dirs: EXCLUDED_DIRS.iter().map(|dir| dir.to_string()).collect(),
        }
    }

    /// Creates a locator honouring the extension and extra exclusions of `config`.
    pub fn from_config(root: impl AsRef<Path>, config: &ScanConfig) -> Self {
        Self::new(root)
            .with_extension(config.extension())
            .with_excluded_dirs(config.excluded_dirs().iter().cloned())
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Adds directory names to prune, on top of [`EXCLUDED_DIRS`].
    pub fn with_excluded_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Starts the traversal.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::WorkspaceUnavailable`] if the root does not exist,
    /// is not a directory, or cannot be listed.
    pub fn files(&self) -> Result<SourceFiles, ScanError> {
        let unavailable = |reason: String| ScanError::WorkspaceUnavailable {
            root: self.root.clone(),
            reason,
        };

        let metadata = fs::metadata(&self.root).map_err(|err| unavailable(err.to_string()))?;
        if !metadata.is_dir() {
            return Err(unavailable("not a directory".to_string()));
        }
        fs::read_dir(&self.root).map_err(|err| unavailable(err.to_string()))?;

        let excluded_dirs = self.excluded_dirs.clone();
        let filter: EntryFilter = Box::new(move |entry: &DirEntry| {
            if entry.depth() == 0 {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            if name.starts_with('.') {
                return false;
            }
            if entry.file_type().is_dir() && excluded_dirs.iter().any(|dir| *dir == name) {
                debug!(path:? = entry.path(); "Skipping excluded directory");
                return false;
            }
            true
        });

        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(filter);

        Ok(SourceFiles {
            walker,
            extension: self.extension.clone(),
        })
    }
}

/// Lazy sequence of candidate files produced by [`SourceLocator::files`].
///
/// Unreadable subdirectories are yielded as [`ScanError::Directory`] items
/// and the walk continues past them.
pub struct SourceFiles {
    walker: FilterEntry<walkdir::IntoIter, EntryFilter>,
    extension: String,
}

impl SourceFiles {
    fn is_candidate(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }
}

impl Iterator for SourceFiles {
    type Item = Result<PathBuf, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.walker.next()? {
                Ok(entry) => {
                    if entry.file_type().is_file() && self.is_candidate(entry.path()) {
                        return Some(Ok(entry.into_path()));
                    }
                }
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                    warn!(path:? = path, err:% = err; "Failed to read directory entry");
                    return Some(Err(ScanError::Directory {
                        path,
                        reason: err.to_string(),
                    }));
                }
            }
        }
    }
}
