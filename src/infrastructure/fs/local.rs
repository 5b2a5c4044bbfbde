//! Disk-backed `FileSystem`
//!
//! Writes go through a sibling temp file and a rename, so readers never see
//! a half-written bundle or stylesheet.

use std::io::Write;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use sha2::{Digest, Sha256};

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        std::fs::read_to_string(path).map_err(|e| FsError::at(path, e))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).map_err(|e| FsError::at(parent, e))?;

        // Write to a sibling temp file, then rename over the target
        let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| FsError::at(parent, e))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| FsError::at(path, e))?;
        tmp.persist(path).map_err(|e| FsError::at(path, e.error))?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        std::fs::create_dir_all(path).map_err(|e| FsError::at(path, e))
    }

    fn remove_dir_all(&self, path: &Path) -> FsResult<()> {
        match std::fs::remove_dir_all(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FsError::at(path, e)),
        }
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> FsResult<usize> {
        if !from.is_dir() {
            return Err(FsError::NotFound(from.to_path_buf()));
        }

        let files = self.list_files(from)?;
        std::fs::create_dir_all(to).map_err(|e| FsError::at(to, e))?;

        for rel in &files {
            let dest = to.join(rel);
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent).map_err(|e| FsError::at(parent, e))?;
            }
            std::fs::copy(from.join(rel), &dest).map_err(|e| FsError::at(&dest, e))?;
        }

        Ok(files.len())
    }

    fn list_files(&self, root: &Path) -> FsResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(true)
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| FsError::Other(e.to_string()))?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(root)
                .map_err(|e| FsError::Other(e.to_string()))?;
            files.push(rel.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    fn hash(&self, path: &Path) -> FsResult<String> {
        let bytes = std::fs::read(path).map_err(|e| FsError::at(path, e))?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(format!("sha256:{:x}", hasher.finalize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_replaces_and_creates_parents() {
        let dir = tempdir().unwrap();
        let css = dir.path().join("assets/css/pds.css");
        let fs = LocalFs::new();

        fs.write(&css, "a{}").unwrap();
        fs.write(&css, "b{}").unwrap();

        assert_eq!(fs.read(&css).unwrap(), "b{}");
        assert_eq!(fs.list_files(&dir.path().join("assets")).unwrap().len(), 1);
    }

    #[test]
    fn remove_dir_all_tolerates_missing_dir() {
        let dir = tempdir().unwrap();
        let fs = LocalFs::new();

        fs.remove_dir_all(&dir.path().join("never-created")).unwrap();

        let present = dir.path().join("dist");
        fs.write(&present.join("css/old.css"), "x").unwrap();
        fs.remove_dir_all(&present).unwrap();
        assert!(!present.exists());
    }

    #[test]
    fn copy_tree_preserves_structure_and_overwrites() {
        let dir = tempdir().unwrap();
        let fs = LocalFs::new();
        let from = dir.path().join("vendor/images");
        let to = dir.path().join("assets/images");

        fs.write(&from.join("glyphicons/halflings.svg"), "new").unwrap();
        fs.write(&from.join("logo.png"), "logo").unwrap();
        fs.write(&to.join("glyphicons/halflings.svg"), "old").unwrap();
        fs.write(&to.join("local.png"), "local").unwrap();

        let copied = fs.copy_tree(&from, &to).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(fs.read(&to.join("glyphicons/halflings.svg")).unwrap(), "new");
        assert_eq!(fs.read(&to.join("local.png")).unwrap(), "local");
        assert_eq!(fs.read(&to.join("logo.png")).unwrap(), "logo");
    }

    #[test]
    fn copy_tree_through_parent_relative_path() {
        let dir = tempdir().unwrap();
        let fs = LocalFs::new();
        fs.write(&dir.path().join("gem/images/a.png"), "a").unwrap();
        fs.create_dir_all(&dir.path().join("gem/stylesheets")).unwrap();

        let from = dir.path().join("gem/stylesheets/../images");
        let to = dir.path().join("out");
        fs.copy_tree(&from, &to).unwrap();

        assert!(to.join("a.png").exists());
    }

    #[test]
    fn copy_tree_missing_source_is_not_found() {
        let dir = tempdir().unwrap();
        let fs = LocalFs::new();
        let err = fs
            .copy_tree(&dir.path().join("nope"), &dir.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, FsError::NotFound(_)));
    }

    #[test]
    fn list_files_is_sorted_and_relative() {
        let dir = tempdir().unwrap();
        let fs = LocalFs::new();
        fs.write(&dir.path().join("b/2.js"), "").unwrap();
        fs.write(&dir.path().join("a.js"), "").unwrap();
        fs.write(&dir.path().join(".hidden"), "").unwrap();

        let files = fs.list_files(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from(".hidden"),
                PathBuf::from("a.js"),
                PathBuf::from("b/2.js")
            ]
        );
    }

    #[test]
    fn hash_is_prefixed_sha256() {
        let dir = tempdir().unwrap();
        let js = dir.path().join("pds.js");
        let fs = LocalFs::new();

        fs.write(&js, "").unwrap();

        assert_eq!(
            fs.hash(&js).unwrap(),
            "sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
