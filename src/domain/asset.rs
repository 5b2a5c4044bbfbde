//! Asset kinds and their directory conventions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of site asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// Compiled CSS
    Stylesheets,
    /// Images (glyph fonts included, as vendors ship them there)
    Images,
    /// Bundled scripts
    Javascripts,
}

impl AssetKind {
    /// Every kind, in the order the distribution tree lists them
    pub const ALL: [AssetKind; 3] = [
        AssetKind::Stylesheets,
        AssetKind::Images,
        AssetKind::Javascripts,
    ];

    /// Directory name used under both `assets/` and `dist/`
    pub fn dir_name(self) -> &'static str {
        match self {
            AssetKind::Stylesheets => "css",
            AssetKind::Images => "images",
            AssetKind::Javascripts => "javascripts",
        }
    }

    /// Whether the bundler (rather than a plain copy) publishes this kind
    pub fn is_bundled(self) -> bool {
        matches!(self, AssetKind::Javascripts)
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetKind::Stylesheets => "stylesheets",
            AssetKind::Images => "images",
            AssetKind::Javascripts => "javascripts",
        };
        f.write_str(name)
    }
}

impl FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stylesheets" | "css" => Ok(AssetKind::Stylesheets),
            "images" => Ok(AssetKind::Images),
            "javascripts" | "js" => Ok(AssetKind::Javascripts),
            other => Err(format!("unknown asset kind '{}'", other)),
        }
    }
}
