//! Stylesheet compiler port

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PdsResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    #[default]
    Expanded,
    Compressed,
}

pub trait StylesheetCompiler {
    /// Compile one stylesheet to CSS.
    ///
    /// `load_paths` are searched, in order, for `@import`ed files.
    fn compile(&self, source: &Path, load_paths: &[PathBuf], style: OutputStyle)
        -> PdsResult<String>;
}

/// Whether `path` is a stylesheet entry point (not a partial)
pub fn is_entry_point(path: &Path) -> bool {
    let is_sass = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == "scss" || e == "sass");
    let is_partial = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('_'));
    is_sass && !is_partial
}
