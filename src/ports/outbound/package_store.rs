use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// PackageStore port for read-only access to an installed package tree
///
/// The scanners only ever need four questions answered about the file
/// system; keeping them behind this port lets tests count or fake the I/O.
///
/// "Absent" answers (`None`, `false`, empty list) cover every case where a
/// path simply is not a package: missing entries, a file where a directory
/// was expected, dangling or looping symlinks, oversized or non-UTF-8
/// manifests. Only genuine I/O failures such as permission errors are
/// returned as `Err`.
///
/// # Async Support
/// All methods are async so sibling lookups can be issued concurrently.
/// Implementations must be `Send + Sync`.
#[async_trait]
pub trait PackageStore: Send + Sync {
    /// Canonical path of `path` with every symlink resolved, or `None` if
    /// it does not exist
    async fn real_path(&self, path: &Path) -> Result<Option<PathBuf>>;

    /// Whether `path` exists and is a directory (following symlinks)
    async fn is_dir(&self, path: &Path) -> Result<bool>;

    /// Names of the entries in directory `path`, sorted; empty if the
    /// directory does not exist
    async fn read_dir_names(&self, path: &Path) -> Result<Vec<String>>;

    /// Contents of the text file at `path`, or `None` if it cannot be
    /// treated as a readable manifest
    async fn read_text_file(&self, path: &Path) -> Result<Option<String>>;
}
