//! Stylesheet compiler backed by `grass`

use std::path::{Path, PathBuf};

use crate::domain::ports::{OutputStyle, StylesheetCompiler};
use crate::error::{PdsError, PdsResult};

/// Sass/SCSS compiler
#[derive(Debug, Clone, Copy, Default)]
pub struct GrassCompiler;

impl GrassCompiler {
    pub fn new() -> Self {
        Self
    }
}

impl StylesheetCompiler for GrassCompiler {
    fn compile(
        &self,
        source: &Path,
        load_paths: &[PathBuf],
        style: OutputStyle,
    ) -> PdsResult<String> {
        let style = match style {
            OutputStyle::Expanded => grass::OutputStyle::Expanded,
            OutputStyle::Compressed => grass::OutputStyle::Compressed,
        };
        let options = grass::Options::default()
            .style(style)
            .quiet(true)
            .load_paths(load_paths);

        grass::from_path(source, &options).map_err(|e| PdsError::StylesheetCompile {
            file: source.to_path_buf(),
            message: e.to_string(),
        })
    }
}
