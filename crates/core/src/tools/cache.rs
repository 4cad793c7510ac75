//! Keyed tool cache.
//!
//! Extracted tool directories are stored by tool name, version and
//! architecture so a later run can reuse them without a network request.

use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::{Error, Result};

/// Keyed store of ready-to-run tool directories.
pub trait ToolCache: Send + Sync {
    /// Find the cached directory for `(tool, version)`.
    ///
    /// Returns `None` on a miss.
    fn find(&self, tool: &str, version: &str) -> Option<PathBuf>;

    /// Commit an extracted directory under `(tool, version)`.
    ///
    /// `binary_name` must exist in `source`. Returns the cached directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the binary is missing or the copy fails.
    fn commit_dir(
        &self,
        source: &Path,
        binary_name: &str,
        tool: &str,
        version: &str,
    ) -> Result<PathBuf>;
}

/// Filesystem tool cache.
///
/// Structure:
/// ```text
/// <root>/
/// └── xc/
///     └── v0.4.0/
///         ├── x64/            # Extracted archive contents
///         │   └── xc
///         └── x64.complete    # Written once the copy finished
/// ```
#[derive(Debug, Clone)]
pub struct FsToolCache {
    root: PathBuf,
    arch: String,
}

impl FsToolCache {
    /// Create a cache at `root` for entries built for `arch`.
    #[must_use]
    pub fn new(root: PathBuf, arch: impl Into<String>) -> Self {
        Self {
            root,
            arch: arch.into(),
        }
    }

    /// Get the cache root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the directory for a cache entry.
    #[must_use]
    pub fn entry_dir(&self, tool: &str, version: &str) -> PathBuf {
        self.root.join(tool).join(version).join(&self.arch)
    }

    /// Marker file written once an entry is complete.
    fn marker_path(&self, tool: &str, version: &str) -> PathBuf {
        self.root
            .join(tool)
            .join(version)
            .join(format!("{}.complete", self.arch))
    }
}

impl ToolCache for FsToolCache {
    fn find(&self, tool: &str, version: &str) -> Option<PathBuf> {
        if tool.is_empty() || version.is_empty() {
            return None;
        }
        let dir = self.entry_dir(tool, version);
        if dir.is_dir() && self.marker_path(tool, version).exists() {
            trace!(tool, version, ?dir, "Cache hit");
            Some(dir)
        } else {
            trace!(tool, version, "Cache miss");
            None
        }
    }

    fn commit_dir(
        &self,
        source: &Path,
        binary_name: &str,
        tool: &str,
        version: &str,
    ) -> Result<PathBuf> {
        if !source.join(binary_name).is_file() {
            return Err(Error::BinaryNotFound {
                name: binary_name.to_string(),
                dir: source.to_path_buf(),
            });
        }

        let dest = self.entry_dir(tool, version);
        let marker = self.marker_path(tool, version);

        // A partial entry from an interrupted run is replaced wholesale
        if marker.exists() {
            std::fs::remove_file(&marker)?;
        }
        if dest.exists() {
            std::fs::remove_dir_all(&dest)?;
        }
        std::fs::create_dir_all(&dest)?;

        copy_tree(source, &dest)?;
        std::fs::write(&marker, b"")?;

        debug!(tool, version, ?dest, "Committed directory to tool cache");
        Ok(dest)
    }
}

/// Recursively copy the contents of `source` into `dest`.
fn copy_tree(source: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(source).min_depth(1) {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| Error::configuration(e.to_string()))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
