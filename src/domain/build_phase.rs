//! Build state machine
//!
//! `Idle -> Resetting -> StagingAssets -> CompilingStyles -> PublishingAssets
//! -> BundlingScripts -> Done`; any step may move to `Failed`, which is terminal.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildPhase {
    Idle,
    Resetting,
    StagingAssets,
    CompilingStyles,
    PublishingAssets,
    BundlingScripts,
    Done,
    Failed,
}

impl BuildPhase {
    /// The phase that follows a successful `self`
    ///
    /// Terminal phases have no successor.
    pub fn next(self) -> Option<BuildPhase> {
        match self {
            BuildPhase::Idle => Some(BuildPhase::Resetting),
            BuildPhase::Resetting => Some(BuildPhase::StagingAssets),
            BuildPhase::StagingAssets => Some(BuildPhase::CompilingStyles),
            BuildPhase::CompilingStyles => Some(BuildPhase::PublishingAssets),
            BuildPhase::PublishingAssets => Some(BuildPhase::BundlingScripts),
            BuildPhase::BundlingScripts => Some(BuildPhase::Done),
            BuildPhase::Done | BuildPhase::Failed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, BuildPhase::Done | BuildPhase::Failed)
    }

    /// Whether the distribution tree may already have been touched
    pub fn has_reset_output(self) -> bool {
        !matches!(self, BuildPhase::Idle)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BuildPhase::Idle => "idle",
            BuildPhase::Resetting => "resetting",
            BuildPhase::StagingAssets => "staging_assets",
            BuildPhase::CompilingStyles => "compiling_styles",
            BuildPhase::PublishingAssets => "publishing_assets",
            BuildPhase::BundlingScripts => "bundling_scripts",
            BuildPhase::Done => "done",
            BuildPhase::Failed => "failed",
        }
    }
}

impl fmt::Display for BuildPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
