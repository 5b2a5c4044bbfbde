//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::application::build::{AssetBuilder, BuildOptions};
use crate::config::{Config, HarnessSection};
use crate::error::PdsResult;
use crate::infrastructure::browser::TransportOptions;
use crate::infrastructure::{
    ConfigVendorRegistry, DirectiveBundler, GrassCompiler, HttpBrowser, LocalFs, ReqwestTransport,
    YamlCredentialSource,
};

/// The builder with all production dependencies
pub type ConcreteAssetBuilder =
    AssetBuilder<ConfigVendorRegistry, LocalFs, GrassCompiler, DirectiveBundler<LocalFs>>;

pub type ConcreteBrowser = HttpBrowser<ReqwestTransport>;

fn rooted(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}

pub fn create_vendor_registry(project_root: &Path, config: &Config) -> ConfigVendorRegistry {
    ConfigVendorRegistry::from_config(project_root, &config.registry)
}

/// Create an asset builder for `project_root` from a fully resolved config
pub fn create_asset_builder(project_root: &Path, config: &Config) -> ConcreteAssetBuilder {
    AssetBuilder::new(
        BuildOptions::from_section(project_root, &config.build),
        create_vendor_registry(project_root, config),
        LocalFs::new(),
        GrassCompiler::new(),
        DirectiveBundler::new(LocalFs::new()),
    )
}

pub fn create_browser(harness: &HarnessSection) -> PdsResult<ConcreteBrowser> {
    let transport = ReqwestTransport::new(transport_options(harness))?;
    Ok(HttpBrowser::new(transport))
}

/// `timeout_secs = 0` disables the request timeout
pub fn transport_options(harness: &HarnessSection) -> TransportOptions {
    TransportOptions {
        timeout: (harness.timeout_secs > 0).then(|| Duration::from_secs(harness.timeout_secs)),
        max_redirects: harness.max_redirects,
        user_agent: harness.user_agent.clone(),
    }
}

pub fn create_credential_source(project_root: &Path, harness: &HarnessSection) -> YamlCredentialSource {
    YamlCredentialSource::new(rooted(project_root, &harness.credentials_file))
        .with_environment(harness.environment.clone())
}
