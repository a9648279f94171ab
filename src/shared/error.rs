use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - resolution finished (duplicates only reported as warnings)
    Success = 0,
    /// Duplicate installs were found and `--fail-on-duplicates` was given
    DuplicatesDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (file I/O error, invalid config, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::DuplicatesDetected => write!(f, "Duplicates Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for dependency resolution.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// keeping the hint text next to the failure it explains.
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("Invalid project path: {path}\nReason: {reason}\n\n💡 Hint: Please specify the directory that contains the project's package.json")]
    InvalidProjectPath { path: PathBuf, reason: String },

    #[error("Failed to read directory: {path}\nDetails: {details}\n\n💡 Hint: Please verify that you have read permissions for the node_modules tree")]
    DirectoryReadError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for builder patterns and config values
    #[error("Validation error: {message}")]
    Validation { message: String },
}
