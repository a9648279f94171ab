use crate::ports::outbound::PackageStore;
use crate::shared::error::ResolverError;
use crate::shared::security::{validate_file_size, MAX_MANIFEST_SIZE};
use crate::shared::Result;
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// FileSystemPackageStore adapter for reading an installed package tree
///
/// Implements the PackageStore port on top of `tokio::fs`. Symlinks are
/// followed everywhere: pnpm and workspace installs are made of them.
///
/// Errors meaning "this path is not a package" are answered as absent:
/// - the path does not exist
/// - a file sits where a directory is expected
/// - a symlink loop
/// - an oversized or non-UTF-8 manifest
///
/// Anything else (permission denied, disk errors) is returned as a
/// `ResolverError`.
pub struct FileSystemPackageStore;

impl FileSystemPackageStore {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemPackageStore {
    fn default() -> Self {
        Self::new()
    }
}

/// errno of a symlink loop; `ErrorKind::FilesystemLoop` is not stable
#[cfg(target_os = "linux")]
const ELOOP: i32 = 40;
#[cfg(not(target_os = "linux"))]
const ELOOP: i32 = 62;

/// Whether an I/O error only means the path is not (part of) a package
fn is_absent(err: &io::Error) -> bool {
    match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => true,
        _ => cfg!(unix) && err.raw_os_error() == Some(ELOOP),
    }
}

#[async_trait]
impl PackageStore for FileSystemPackageStore {
    async fn real_path(&self, path: &Path) -> Result<Option<PathBuf>> {
        match fs::canonicalize(path).await {
            Ok(real) => Ok(Some(real)),
            Err(e) if is_absent(&e) => Ok(None),
            Err(e) => Err(ResolverError::DirectoryReadError {
                path: path.to_path_buf(),
                details: format!("Failed to resolve path: {}", e),
            }
            .into()),
        }
    }

    async fn is_dir(&self, path: &Path) -> Result<bool> {
        match fs::metadata(path).await {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(e) if is_absent(&e) => Ok(false),
            Err(e) => Err(ResolverError::DirectoryReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()),
        }
    }

    async fn read_dir_names(&self, path: &Path) -> Result<Vec<String>> {
        let to_error = |e: io::Error| ResolverError::DirectoryReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        };

        let mut entries = match fs::read_dir(path).await {
            Ok(entries) => entries,
            Err(e) if is_absent(&e) => return Ok(Vec::new()),
            Err(e) => return Err(to_error(e).into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(to_error)? {
            // Package names are always valid UTF-8
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    async fn read_text_file(&self, path: &Path) -> Result<Option<String>> {
        let to_error = |e: io::Error| ResolverError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        };

        let metadata = match fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(e) if is_absent(&e) => return Ok(None),
            Err(e) => return Err(to_error(e).into()),
        };
        if !metadata.is_file() {
            return Ok(None);
        }
        if let Err(e) = validate_file_size(metadata.len(), path, MAX_MANIFEST_SIZE) {
            eprintln!("Warning: Skipping manifest. {}", e);
            return Ok(None);
        }

        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if is_absent(&e) => return Ok(None),
            Err(e) => return Err(to_error(e).into()),
        };
        Ok(String::from_utf8(bytes).ok())
    }
}
