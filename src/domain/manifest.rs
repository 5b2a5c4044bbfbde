//! Build manifest
//!
//! An ordered list of copy/compile/bundle instructions, built fresh for every
//! invocation and never persisted.

use std::path::PathBuf;

use serde::Serialize;

use super::asset::AssetKind;
use super::build_phase::BuildPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildAction {
    /// Recursive copy, overwriting on conflict
    Copy,
    /// Stylesheet compilation
    Compile,
    /// Script bundling
    Bundle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildInstruction {
    pub phase: BuildPhase,
    pub kind: AssetKind,
    pub action: BuildAction,
    pub source: PathBuf,
    pub destination: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildManifest {
    instructions: Vec<BuildInstruction>,
}

impl BuildManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instruction: BuildInstruction) {
        self.instructions.push(instruction);
    }

    pub fn copy(
        &mut self,
        phase: BuildPhase,
        kind: AssetKind,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
    ) {
        self.push(BuildInstruction {
            phase,
            kind,
            action: BuildAction::Copy,
            source: source.into(),
            destination: destination.into(),
        });
    }

    pub fn instructions(&self) -> &[BuildInstruction] {
        &self.instructions
    }

    /// Instructions belonging to one phase, in manifest order
    pub fn for_phase(&self, phase: BuildPhase) -> impl Iterator<Item = &BuildInstruction> {
        self.instructions.iter().filter(move |i| i.phase == phase)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
