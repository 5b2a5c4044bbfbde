//! YAML secrets file credential source
//!
//! Expected shape, optionally nested under an environment key:
//!
//! ```yaml
//! nyu:
//!   student:
//!     username: jdoe
//!     password: pw123
//! ```

use std::path::{Path, PathBuf};

use serde_yaml_ng::Value;

use crate::domain::credential::Credential;
use crate::domain::ports::{CredentialError, CredentialSource};

#[derive(Debug, Clone)]
pub struct YamlCredentialSource {
    path: PathBuf,
    environment: Option<String>,
}

impl YamlCredentialSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            environment: None,
        }
    }

    /// Read credentials from under a top-level environment key
    pub fn with_environment(mut self, environment: Option<String>) -> Self {
        self.environment = environment;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Value, CredentialError> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|error| CredentialError::Unreadable {
                source_file: self.path.clone(),
                error,
            })?;
        serde_yaml_ng::from_str(&content).map_err(|e| CredentialError::Invalid {
            source_file: self.path.clone(),
            message: e.to_string(),
        })
    }
}

impl CredentialSource for YamlCredentialSource {
    fn lookup(&self, institution: &str, user_type: &str) -> Result<Credential, CredentialError> {
        let root = self.load()?;

        let mut keys: Vec<&str> = Vec::new();
        if let Some(env) = self.environment.as_deref() {
            keys.push(env);
        }
        keys.push(institution);
        keys.push(user_type);

        let mut node = &root;
        for (depth, key) in keys.iter().enumerate() {
            node = node.get(*key).ok_or_else(|| CredentialError::NotFound {
                key: keys[..=depth].join("."),
                source_file: self.path.clone(),
            })?;
        }

        serde_yaml_ng::from_value(node.clone()).map_err(|e| CredentialError::Invalid {
            source_file: self.path.clone(),
            message: format!("{}: {}", keys.join("."), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::fs;
    use tempfile::tempdir;

    const SECRETS: &str = r#"
nyu:
  student:
    username: jdoe
    password: pw123
cooper:
  faculty:
    username: cfaculty
    password: cooperpw
"#;

    fn source_with(content: &str) -> (tempfile::TempDir, YamlCredentialSource) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.yml");
        fs::write(&path, content).unwrap();
        (dir, YamlCredentialSource::new(path))
    }

    #[test]
    fn looks_up_institution_and_user_type() {
        let (_dir, source) = source_with(SECRETS);
        let credential = source.lookup("nyu", "student").unwrap();
        assert_eq!(credential, Credential::new("jdoe", "pw123"));
    }

    #[test]
    fn missing_key_names_the_absent_path() {
        let (_dir, source) = source_with(SECRETS);
        let err = source.lookup("nysid", "faculty").unwrap_err();
        match err {
            CredentialError::NotFound { key, .. } => assert_eq!(key, "nysid"),
            other => panic!("unexpected error: {other}"),
        }

        let err = source.lookup("nyu", "faculty").unwrap_err();
        assert!(matches!(err, CredentialError::NotFound { ref key, .. } if key == "nyu.faculty"));
    }

    #[test]
    fn environment_scopes_the_lookup() {
        let (_dir, source) = source_with("staging:\n  nyu:\n    student:\n      username: s\n      password: p\n");
        let source = source.with_environment(Some("staging".to_string()));
        assert_eq!(
            source.lookup("nyu", "student").unwrap(),
            Credential::new("s", "p")
        );
    }

    #[test]
    fn incomplete_entry_is_invalid() {
        let (_dir, source) = source_with("nyu:\n  student:\n    username: jdoe\n");
        let err = source.lookup("nyu", "student").unwrap_err();
        assert!(matches!(err, CredentialError::Invalid { .. }));
    }

    #[test]
    fn lookups_are_not_cached() {
        let (dir, source) = source_with(SECRETS);
        assert_eq!(source.lookup("nyu", "student").unwrap().username, "jdoe");

        fs::write(
            dir.path().join("credentials.yml"),
            "nyu:\n  student:\n    username: rotated\n    password: new\n",
        )
        .unwrap();
        assert_eq!(source.lookup("nyu", "student").unwrap().username, "rotated");
    }

    #[test]
    fn missing_file_is_unreadable() {
        let source = YamlCredentialSource::new("/nonexistent/credentials.yml");
        assert!(matches!(
            source.lookup("nyu", "student"),
            Err(CredentialError::Unreadable { .. })
        ));
    }

    proptest! {
        #[test]
        fn lookup_is_pure(institution in "(nyu|cooper|nysid)", user_type in "(student|faculty)") {
            let (_dir, source) = source_with(SECRETS);
            let first = source.lookup(&institution, &user_type).ok();
            let second = source.lookup(&institution, &user_type).ok();
            prop_assert_eq!(first, second);
        }
    }
}
