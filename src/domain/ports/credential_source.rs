//! Credential source port

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::credential::Credential;

#[derive(Debug, Error)]
pub enum CredentialError {
    /// The key path is absent from the secrets source
    #[error("no credentials at '{key}' in {}", .source_file.display())]
    NotFound { key: String, source_file: PathBuf },

    /// The secrets source exists but cannot be read as credentials
    #[error("invalid credentials file {}: {message}", .source_file.display())]
    Invalid { source_file: PathBuf, message: String },

    #[error("cannot read credentials file {}: {error}", .source_file.display())]
    Unreadable {
        source_file: PathBuf,
        error: std::io::Error,
    },
}

/// Pure lookup of `(institution, user_type)` credentials.
///
/// Implementations resolve fresh on every call and never substitute a default.
pub trait CredentialSource {
    fn lookup(&self, institution: &str, user_type: &str) -> Result<Credential, CredentialError>;
}
