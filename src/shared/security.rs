use crate::shared::error::ResolverError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of a manifest we are willing to parse (10 MiB).
/// A `package.json` or `expo-module.config.json` larger than this is
/// treated as unreadable instead of being loaded into memory.
pub const MAX_MANIFEST_SIZE: u64 = 10 * 1024 * 1024;

/// Validates that a project path exists and resolves to a directory
///
/// Symbolic links are allowed (monorepo tooling links workspaces around),
/// but the canonical target must be a directory.
///
/// # Errors
/// Returns `ResolverError::InvalidProjectPath` if the path is missing,
/// cannot be canonicalized or is not a directory
pub fn validate_project_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ResolverError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    let canonical_path = fs::canonicalize(path).map_err(|e| ResolverError::InvalidProjectPath {
        path: path.to_path_buf(),
        reason: format!("Failed to canonicalize path: {}", e),
    })?;

    if !canonical_path.is_dir() {
        return Err(ResolverError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Validates file size is within acceptable limits
///
/// # Errors
/// Returns an error if the file size exceeds the maximum
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "{} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}
