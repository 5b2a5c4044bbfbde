//! Directive-based script bundler
//!
//! Every top-level `.js` file of the project's `javascripts/` directory is an
//! entry point. A header of `//=` directives pulls in other files:
//!
//! ```text
//! //= require jquery
//! //= require bootstrap/dropdown
//! //= require_tree ./pds
//! //= require_self
//! ```
//!
//! `require` names resolve against the search paths in registration order,
//! so the first path holding a match wins. Paths starting with `./` or `../`
//! resolve against the requiring file instead. Each file lands in a bundle at
//! most once.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::asset::AssetKind;
use crate::domain::ports::script_bundler::candidates;
use crate::domain::ports::{BundleConfig, FileSystem, ScriptBundler};
use crate::error::{PdsError, PdsResult};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Directive {
    Require(String),
    RequireTree(String),
    RequireSelf,
}

/// Split a script into its directive header and body
fn parse_header(source: &str) -> (Vec<Directive>, String) {
    let mut directives = Vec::new();
    let mut body = Vec::new();
    let mut in_header = true;

    for line in source.lines() {
        let trimmed = line.trim();
        if in_header {
            if let Some(rest) = trimmed.strip_prefix("//=") {
                let rest = rest.trim();
                let (name, arg) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let arg = arg.trim().trim_matches(|c| c == '"' || c == '\'').to_string();
                match name {
                    "require" => directives.push(Directive::Require(arg)),
                    "require_tree" => directives.push(Directive::RequireTree(arg)),
                    "require_self" => directives.push(Directive::RequireSelf),
                    other => tracing::warn!("ignoring unknown directive '{}'", other),
                }
                continue;
            }
            if trimmed.is_empty() || trimmed.starts_with("//") {
                body.push(line);
                continue;
            }
            in_header = false;
        }
        body.push(line);
    }

    let mut body = body.join("\n");
    if !body.is_empty() && !body.ends_with('\n') {
        body.push('\n');
    }
    (directives, body)
}

/// Sprockets-style concatenating bundler
#[derive(Debug, Clone, Default)]
pub struct DirectiveBundler<FS: FileSystem> {
    fs: FS,
}

impl<FS: FileSystem> DirectiveBundler<FS> {
    pub fn new(fs: FS) -> Self {
        Self { fs }
    }

    fn bundle_entry(&self, config: &BundleConfig, entry: &Path) -> PdsResult<String> {
        let mut out = String::new();
        let mut seen = HashSet::new();
        self.include(config, entry, entry, &mut seen, &mut out)?;
        Ok(out)
    }

    fn include(
        &self,
        config: &BundleConfig,
        entry: &Path,
        file: &Path,
        seen: &mut HashSet<PathBuf>,
        out: &mut String,
    ) -> PdsResult<()> {
        let key = file.canonicalize().unwrap_or_else(|_| file.to_path_buf());
        if !seen.insert(key) {
            return Ok(());
        }

        let source = self.fs.read(file).map_err(|e| PdsError::ScriptBundle {
            entry: entry.to_path_buf(),
            message: e.to_string(),
        })?;
        let (directives, body) = parse_header(&source);
        let base = file.parent().unwrap_or_else(|| Path::new("."));
        let mut self_emitted = false;

        for directive in directives {
            match directive {
                Directive::Require(name) => {
                    let target = if name.starts_with("./") || name.starts_with("../") {
                        candidates(&name)
                            .into_iter()
                            .map(|c| base.join(c))
                            .find(|p| p.is_file())
                    } else {
                        self.resolve(config, &name)
                    };
                    let target = target.ok_or_else(|| PdsError::ScriptBundle {
                        entry: entry.to_path_buf(),
                        message: format!("couldn't find file '{}' required by {}", name, file.display()),
                    })?;
                    self.include(config, entry, &target, seen, out)?;
                }
                Directive::RequireTree(dir) => {
                    let root = base.join(&dir);
                    if !self.fs.is_dir(&root) {
                        return Err(PdsError::ScriptBundle {
                            entry: entry.to_path_buf(),
                            message: format!("require_tree argument must be a directory: {}", dir),
                        });
                    }
                    let files = self.fs.list_files(&root)?;
                    for rel in files.iter().filter(|p| is_script(p)) {
                        self.include(config, entry, &root.join(rel), seen, out)?;
                    }
                }
                Directive::RequireSelf => {
                    out.push_str(&body);
                    self_emitted = true;
                }
            }
        }

        if !self_emitted {
            out.push_str(&body);
        }
        Ok(())
    }
}

fn is_script(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "js")
}

impl<FS: FileSystem> ScriptBundler for DirectiveBundler<FS> {
    fn bundle(&self, config: &BundleConfig) -> PdsResult<Vec<PathBuf>> {
        let mut written = Vec::new();

        for &kind in &config.kinds {
            if kind != AssetKind::Javascripts {
                tracing::debug!(%kind, "bundler skips non-script kind");
                continue;
            }

            let entry_dir = config.entry_dir(kind);
            if !self.fs.is_dir(&entry_dir) {
                tracing::warn!(dir = %entry_dir.display(), "no script entry points");
                continue;
            }

            // Only top-level files are entry points; subdirectories hold modules
            let entries: Vec<PathBuf> = self
                .fs
                .list_files(&entry_dir)?
                .into_iter()
                .filter(|rel| rel.components().count() == 1 && is_script(rel))
                .map(|rel| entry_dir.join(rel))
                .collect();

            for entry in entries {
                let bundle = self.bundle_entry(config, &entry)?;
                let Some(file_name) = entry.file_name() else {
                    continue;
                };
                let dest = config.output_dir(kind).join(file_name);
                self.fs.write(&dest, &bundle)?;
                tracing::info!(entry = %entry.display(), dest = %dest.display(), "bundled script");
                written.push(dest);
            }
        }

        Ok(written)
    }

    fn resolve(&self, config: &BundleConfig, name: &str) -> Option<PathBuf> {
        let names = candidates(name);
        config.search_paths.iter().find_map(|root| {
            names
                .iter()
                .map(|candidate| root.join(candidate))
                .find(|path| path.is_file())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::fs::LocalFs;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    struct Layout {
        _dir: TempDir,
        project: PathBuf,
        vendor: PathBuf,
        out: PathBuf,
    }

    fn layout() -> Layout {
        let dir = tempdir().unwrap();
        let project = dir.path().join("assets");
        let vendor = dir.path().join("vendor/javascripts");
        let out = dir.path().join("dist");
        fs::create_dir_all(project.join("javascripts")).unwrap();
        fs::create_dir_all(&vendor).unwrap();
        Layout {
            project,
            vendor,
            out,
            _dir: dir,
        }
    }

    fn config(l: &Layout) -> BundleConfig {
        BundleConfig {
            search_paths: vec![l.project.join("javascripts"), l.vendor.clone()],
            output_root: l.out.clone(),
            project_root: l.project.clone(),
            kinds: vec![AssetKind::Javascripts],
        }
    }

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn header_directives_are_split_from_body() {
        let (directives, body) = parse_header(
            "//= require jquery\n//= require_tree ./pds\n// plain comment\nvar a = 1;\n//= require late\n",
        );
        assert_eq!(
            directives,
            vec![
                Directive::Require("jquery".into()),
                Directive::RequireTree("./pds".into())
            ]
        );
        assert_eq!(body, "// plain comment\nvar a = 1;\n//= require late\n");
    }

    #[test]
    fn first_registered_search_path_wins() {
        let l = layout();
        write(&l.project.join("javascripts/widget.js"), "project widget\n");
        write(&l.vendor.join("widget.js"), "vendor widget\n");

        let bundler = DirectiveBundler::new(LocalFs::new());
        let resolved = bundler.resolve(&config(&l), "widget").unwrap();
        assert_eq!(resolved, l.project.join("javascripts/widget.js"));
    }

    #[test]
    fn bundles_requires_before_body_once_each() {
        let l = layout();
        write(&l.vendor.join("jquery.js"), "jquery\n");
        write(&l.vendor.join("bootstrap/dropdown.js"), "//= require jquery\ndropdown\n");
        write(
            &l.project.join("javascripts/pds.js"),
            "//= require jquery\n//= require bootstrap/dropdown\npds\n",
        );

        let bundler = DirectiveBundler::new(LocalFs::new());
        let written = bundler.bundle(&config(&l)).unwrap();

        assert_eq!(written, vec![l.out.join("javascripts/pds.js")]);
        let bundle = fs::read_to_string(&written[0]).unwrap();
        assert_eq!(bundle, "jquery\ndropdown\npds\n");
    }

    #[test]
    fn require_tree_and_require_self_order() {
        let l = layout();
        write(&l.project.join("javascripts/pds/b.js"), "b\n");
        write(&l.project.join("javascripts/pds/a.js"), "a\n");
        write(
            &l.project.join("javascripts/login.js"),
            "//= require_self\n//= require_tree ./pds\nlogin\n",
        );

        let bundler = DirectiveBundler::new(LocalFs::new());
        bundler.bundle(&config(&l)).unwrap();

        let bundle = fs::read_to_string(l.out.join("javascripts/login.js")).unwrap();
        assert_eq!(bundle, "login\na\nb\n");
    }

    #[test]
    fn missing_require_fails_the_bundle() {
        let l = layout();
        write(&l.project.join("javascripts/pds.js"), "//= require nowhere\n");

        let bundler = DirectiveBundler::new(LocalFs::new());
        let err = bundler.bundle(&config(&l)).unwrap_err();

        assert!(err.to_string().contains("couldn't find file 'nowhere'"));
        assert!(!l.out.join("javascripts/pds.js").exists());
    }

    #[test]
    fn cyclic_requires_terminate() {
        let l = layout();
        write(&l.vendor.join("a.js"), "//= require b\na\n");
        write(&l.vendor.join("b.js"), "//= require a\nb\n");
        write(&l.project.join("javascripts/main.js"), "//= require a\nmain\n");

        let bundler = DirectiveBundler::new(LocalFs::new());
        bundler.bundle(&config(&l)).unwrap();

        let bundle = fs::read_to_string(l.out.join("javascripts/main.js")).unwrap();
        assert_eq!(bundle, "b\na\nmain\n");
    }
}
