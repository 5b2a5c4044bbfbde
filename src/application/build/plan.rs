//! Manifest and bundler configuration for one build

use crate::config::ImageStaging;
use crate::domain::asset::AssetKind;
use crate::domain::build_phase::BuildPhase;
use crate::domain::manifest::{BuildAction, BuildInstruction, BuildManifest};
use crate::domain::ports::BundleConfig;
use crate::domain::vendor::VendorPackage;

use super::options::BuildOptions;

/// Every copy/compile/bundle step of a build, in execution order
pub fn plan_manifest(options: &BuildOptions, vendors: &[VendorPackage]) -> BuildManifest {
    let mut manifest = BuildManifest::new();

    let image_target = match options.image_staging {
        ImageStaging::WorkingTree => options.assets_dir_for(AssetKind::Images),
        ImageStaging::Distribution => options.dist_dir_for(AssetKind::Images),
    };
    for vendor in vendors {
        manifest.copy(
            BuildPhase::StagingAssets,
            AssetKind::Images,
            vendor.images_dir(),
            image_target.clone(),
        );
    }

    if options.compile_stylesheets {
        manifest.push(BuildInstruction {
            phase: BuildPhase::CompilingStyles,
            kind: AssetKind::Stylesheets,
            action: BuildAction::Compile,
            source: options.sass_root(),
            destination: options.css_root(),
        });
    }

    for kind in AssetKind::ALL.into_iter().filter(|k| !k.is_bundled()) {
        manifest.copy(
            BuildPhase::PublishingAssets,
            kind,
            options.assets_dir_for(kind),
            options.dist_dir_for(kind),
        );
    }

    manifest.push(BuildInstruction {
        phase: BuildPhase::BundlingScripts,
        kind: AssetKind::Javascripts,
        action: BuildAction::Bundle,
        source: options.assets_dir_for(AssetKind::Javascripts),
        destination: options.dist_dir_for(AssetKind::Javascripts),
    });

    manifest
}

/// Bundler configuration: project scripts first, then each vendor's, unless
/// the options list search paths explicitly.
pub fn bundle_config(options: &BuildOptions, vendors: &[VendorPackage]) -> BundleConfig {
    let explicit = options.explicit_search_paths();
    let search_paths = if explicit.is_empty() {
        std::iter::once(options.assets_dir_for(AssetKind::Javascripts))
            .chain(vendors.iter().map(VendorPackage::javascripts_dir))
            .collect()
    } else {
        explicit
    };

    BundleConfig {
        search_paths,
        output_root: options.dist_root(),
        project_root: options.assets_root(),
        kinds: vec![AssetKind::Javascripts],
    }
}
