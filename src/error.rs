//! Error types for pds-site
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::browser::BrowserError;
use crate::domain::ports::credential_source::CredentialError;
use crate::domain::ports::file_system::FsError;

/// Result type alias for pds-site operations
pub type PdsResult<T> = Result<T, PdsError>;

/// Main error type for pds-site operations
#[derive(Error, Debug)]
pub enum PdsError {
    /// A vendor package named in the build is not in the registry
    #[error("vendor package '{name}' is not registered (known: {known})")]
    UnknownVendor { name: String, known: String },

    /// The stylesheet compiler rejected a source file
    #[error("failed to compile stylesheet {}: {message}", .file.display())]
    StylesheetCompile { file: PathBuf, message: String },

    /// The script bundler could not produce a bundle
    #[error("failed to bundle {}: {message}", .entry.display())]
    ScriptBundle { entry: PathBuf, message: String },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {}: {message}", .file.display())]
    InvalidConfig { file: PathBuf, message: String },

    /// Scenario file could not be parsed
    #[error("invalid scenario file {}: {message}", .file.display())]
    InvalidScenarios { file: PathBuf, message: String },

    /// Directory not found
    #[error("directory not found: {}", .path.display())]
    DirectoryNotFound { path: PathBuf },

    /// File system port error
    #[error(transparent)]
    Fs(#[from] FsError),

    /// Browser driver error
    #[error(transparent)]
    Browser(#[from] BrowserError),

    /// Credential lookup error
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
