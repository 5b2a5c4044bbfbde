//! Asset Build Use Case
//!
//! Drives the build state machine over a freshly planned manifest.

use std::path::Path;
use std::time::Instant;

use crate::domain::asset::AssetKind;
use crate::domain::build_phase::BuildPhase;
use crate::domain::manifest::{BuildAction, BuildInstruction, BuildManifest};
use crate::domain::ports::{
    is_entry_point, FileSystem, ScriptBundler, StylesheetCompiler, VendorRegistry,
};
use crate::domain::vendor::VendorPackage;
use crate::error::{PdsError, PdsResult};

use super::options::BuildOptions;
use super::plan::{bundle_config, plan_manifest};
use super::result::{BuildReport, DistFile};

/// Counters gathered while executing a manifest
#[derive(Debug, Default)]
struct Tally {
    stylesheets: usize,
    scripts: usize,
}

/// Builds the distribution tree
pub struct AssetBuilder<R, FS, SC, SB>
where
    R: VendorRegistry,
    FS: FileSystem,
    SC: StylesheetCompiler,
    SB: ScriptBundler,
{
    options: BuildOptions,
    registry: R,
    fs: FS,
    compiler: SC,
    bundler: SB,
}

impl<R, FS, SC, SB> AssetBuilder<R, FS, SC, SB>
where
    R: VendorRegistry,
    FS: FileSystem,
    SC: StylesheetCompiler,
    SB: ScriptBundler,
{
    pub fn new(options: BuildOptions, registry: R, fs: FS, compiler: SC, bundler: SB) -> Self {
        Self {
            options,
            registry,
            fs,
            compiler,
            bundler,
        }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Resolve the configured vendor packages, in configured order
    pub fn vendors(&self) -> PdsResult<Vec<VendorPackage>> {
        self.registry.resolve_all(&self.options.vendors)
    }

    /// Run a full build
    ///
    /// `on_phase` is called on every state transition, including `Failed`.
    /// A failure after the reset removes the partial distribution tree.
    pub fn run(&self, mut on_phase: impl FnMut(BuildPhase)) -> PdsResult<BuildReport> {
        let started = Instant::now();

        // Unknown vendors and unsafe output roots fail before anything is touched
        let checked = self.vendors().and_then(|vendors| {
            self.options.check_dist_root(&vendors)?;
            Ok(vendors)
        });
        let vendors = match checked {
            Ok(v) => v,
            Err(e) => {
                on_phase(BuildPhase::Failed);
                return Err(e);
            }
        };
        let manifest = plan_manifest(&self.options, &vendors);

        let mut phase = BuildPhase::Idle;
        let mut tally = Tally::default();
        let outcome = self.execute(&manifest, &vendors, &mut tally, &mut |next| {
            phase = next;
            tracing::info!(phase = %next, "build phase");
            on_phase(next);
        });

        if let Err(err) = outcome {
            tracing::error!(%phase, error = %err, "build failed");
            if phase.has_reset_output() {
                let dist = self.options.dist_root();
                if let Err(cleanup) = self.fs.remove_dir_all(&dist) {
                    tracing::warn!(dist = %dist.display(), error = %cleanup, "cannot remove partial output");
                }
            }
            on_phase(BuildPhase::Failed);
            return Err(err);
        }

        on_phase(BuildPhase::Done);
        let files = self.published_files()?;
        Ok(BuildReport {
            phase: BuildPhase::Done,
            dist_root: self.options.dist_root(),
            vendors,
            manifest,
            files,
            stylesheets_compiled: tally.stylesheets,
            scripts_bundled: tally.scripts,
            duration_ms: started.elapsed().as_millis() as u64,
            finished_at: chrono::Utc::now(),
        })
    }

    fn execute(
        &self,
        manifest: &BuildManifest,
        vendors: &[VendorPackage],
        tally: &mut Tally,
        enter: &mut dyn FnMut(BuildPhase),
    ) -> PdsResult<()> {
        let mut phase = BuildPhase::Idle;
        while let Some(next) = phase.next() {
            if next.is_terminal() {
                break;
            }
            phase = next;
            enter(phase);
            match phase {
                BuildPhase::Resetting => self.reset()?,
                _ => {
                    for instruction in manifest.for_phase(phase) {
                        self.apply(instruction, vendors, tally)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Remove previous output and recreate the empty distribution layout
    pub fn reset(&self) -> PdsResult<()> {
        let dist = self.options.dist_root();
        self.fs.remove_dir_all(&dist)?;
        if self.options.compile_stylesheets {
            self.fs.remove_dir_all(&self.options.css_root())?;
        }
        for kind in AssetKind::ALL {
            self.fs.create_dir_all(&self.options.dist_dir_for(kind))?;
        }
        tracing::debug!(dist = %dist.display(), "distribution tree reset");
        Ok(())
    }

    fn apply(
        &self,
        instruction: &BuildInstruction,
        vendors: &[VendorPackage],
        tally: &mut Tally,
    ) -> PdsResult<()> {
        match instruction.action {
            BuildAction::Copy => self.copy(&instruction.source, &instruction.destination),
            BuildAction::Compile => {
                tally.stylesheets +=
                    self.compile_stylesheets(&instruction.source, &instruction.destination, vendors)?;
                Ok(())
            }
            BuildAction::Bundle => {
                tally.scripts += self.bundle_scripts(vendors)?;
                Ok(())
            }
        }
    }

    fn copy(&self, from: &Path, to: &Path) -> PdsResult<()> {
        if !self.fs.is_dir(from) {
            tracing::warn!(source = %from.display(), "nothing to copy");
            return Ok(());
        }
        let copied = self.fs.copy_tree(from, to)?;
        tracing::debug!(source = %from.display(), dest = %to.display(), files = copied, "copied");
        Ok(())
    }

    /// Compile every entry stylesheet under `sass_root` into `css_root`
    ///
    /// Imports resolve against the project sass directory first, then each
    /// vendor's stylesheets directory.
    pub fn compile_stylesheets(
        &self,
        sass_root: &Path,
        css_root: &Path,
        vendors: &[VendorPackage],
    ) -> PdsResult<usize> {
        if !self.fs.is_dir(sass_root) {
            tracing::warn!(dir = %sass_root.display(), "no stylesheets to compile");
            return Ok(0);
        }

        let load_paths: Vec<_> = std::iter::once(sass_root.to_path_buf())
            .chain(vendors.iter().map(|v| v.stylesheets_dir().to_path_buf()))
            .collect();

        let mut compiled = 0;
        for rel in self.fs.list_files(sass_root)? {
            if !is_entry_point(&rel) {
                continue;
            }
            let source = sass_root.join(&rel);
            let css = self
                .compiler
                .compile(&source, &load_paths, self.options.output_style)?;
            let dest = css_root.join(rel.with_extension("css"));
            self.fs.write(&dest, &css)?;
            tracing::info!(source = %source.display(), dest = %dest.display(), "compiled stylesheet");
            compiled += 1;
        }
        Ok(compiled)
    }

    /// Bundle scripts into a scratch tree, then publish it
    ///
    /// `dist/javascripts` only ever receives complete bundles.
    pub fn bundle_scripts(&self, vendors: &[VendorPackage]) -> PdsResult<usize> {
        let config = bundle_config(&self.options, vendors);
        let staging = tempfile::Builder::new()
            .prefix("pds-bundle-")
            .tempdir()?;
        let staged = config.with_output_root(staging.path());

        let written = self.bundler.bundle(&staged)?;
        let staged_dir = staged.output_dir(AssetKind::Javascripts);
        if self.fs.is_dir(&staged_dir) {
            self.fs
                .copy_tree(&staged_dir, &config.output_dir(AssetKind::Javascripts))?;
        }
        Ok(written.len())
    }

    fn published_files(&self) -> PdsResult<Vec<DistFile>> {
        let dist = self.options.dist_root();
        self.fs
            .list_files(&dist)?
            .into_iter()
            .map(|path| {
                let hash = self.fs.hash(&dist.join(&path))?;
                Ok(DistFile { path, hash })
            })
            .collect::<Result<_, crate::domain::ports::FsError>>()
            .map_err(PdsError::from)
    }
}
