//! Manifest discovery

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::debug;

use crate::config::{ALWAYS_SKIPPED_DIRS, MANIFEST_FILE_NAME, WORKSPACE_FILE_NAME};
use crate::version::error::ListError;

/// Files found under a scanned root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Every package.json, in traversal order
    pub manifests: Vec<PathBuf>,
    /// pnpm-workspace.yaml, only when it sits directly in the root
    pub workspace_descriptor: Option<PathBuf>,
}

/// Produces the manifests of a project tree
pub trait FileLister: Send + Sync {
    fn list(&self, root: &Path) -> Result<Listing, ListError>;
}

/// Recursive lister honouring `.gitignore` files
pub struct WalkLister {
    skip_dirs: Vec<String>,
}

impl WalkLister {
    /// Create a lister that also prunes the given directory names
    pub fn new(extra_skip_dirs: &[String]) -> Self {
        let skip_dirs = ALWAYS_SKIPPED_DIRS
            .iter()
            .map(|dir| dir.to_string())
            .chain(extra_skip_dirs.iter().cloned())
            .collect();

        Self { skip_dirs }
    }
}

impl Default for WalkLister {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl FileLister for WalkLister {
    fn list(&self, root: &Path) -> Result<Listing, ListError> {
        // Fail on an unreadable root before the walker turns it into a per-entry error
        std::fs::read_dir(root).map_err(|source| ListError::Read {
            path: root.to_path_buf(),
            source,
        })?;

        let skip_dirs = self.skip_dirs.clone();
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .git_ignore(true)
            .require_git(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(is_dir
                    && entry.depth() > 0
                    && skip_dirs
                        .iter()
                        .any(|dir| entry.file_name() == OsStr::new(dir)))
            })
            .build();

        let mut manifests = Vec::new();
        for result in walker {
            let entry = result.map_err(|source| ListError::Walk {
                path: root.to_path_buf(),
                source,
            })?;

            // Symlinked manifests count when they resolve to a regular file
            let is_file = entry.file_type().is_some_and(|t| {
                t.is_file() || (t.is_symlink() && entry.path().is_file())
            });

            if is_file && entry.file_name() == OsStr::new(MANIFEST_FILE_NAME)
            {
                debug!("Found manifest {}", entry.path().display());
                manifests.push(entry.into_path());
            }
        }

        let descriptor = root.join(WORKSPACE_FILE_NAME);
        let workspace_descriptor = descriptor.is_file().then_some(descriptor);

        Ok(Listing {
            manifests,
            workspace_descriptor,
        })
    }
}
