use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

use super::loader::with_env_overrides;
use super::*;
use crate::domain::ports::OutputStyle;
use crate::domain::scenario::Campus;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_match_site_layout() {
    let config = Config::default();
    assert_eq!(config.build.assets_dir, PathBuf::from("assets"));
    assert_eq!(config.build.dist_dir, PathBuf::from("dist"));
    assert_eq!(config.build.sass_dir, PathBuf::from("sass"));
    assert_eq!(config.build.css_dir, PathBuf::from("css"));
    assert!(config.build.compile_stylesheets);
    assert_eq!(config.build.image_staging, ImageStaging::WorkingTree);
    assert_eq!(
        config.harness.credentials_file,
        PathBuf::from("config/credentials.yml")
    );
    assert_eq!(config.harness.timeout_secs, 30);
}

#[test]
fn load_full_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pds.toml");
    fs::write(
        &path,
        r#"
[build]
vendors = ["bootstrap", "nyulibraries-assets"]
image_staging = "distribution"
output_style = "compressed"

[registry.bootstrap]
stylesheets_dir = "vendor/bootstrap/assets/stylesheets"

[registry.nyulibraries-assets]
stylesheets_dir = "vendor/nyulibraries-assets/lib/assets/stylesheets"

[harness]
environment = "staging"
campus = "off_campus"
"#,
    )
    .unwrap();

    let (config, warnings) = Config::load_with_warnings(&path).unwrap();
    assert!(warnings.is_empty());
    assert_eq!(config.build.vendors, vec!["bootstrap", "nyulibraries-assets"]);
    assert_eq!(config.build.image_staging, ImageStaging::Distribution);
    assert_eq!(config.build.output_style, OutputStyle::Compressed);
    assert_eq!(config.registry.len(), 2);
    assert_eq!(
        config.registry["bootstrap"].stylesheets_dir,
        PathBuf::from("vendor/bootstrap/assets/stylesheets")
    );
    assert_eq!(config.harness.environment.as_deref(), Some("staging"));
    assert_eq!(config.harness.campus, Some(Campus::OffCampus));
}

#[test]
fn unknown_keys_are_warnings_with_suggestions() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pds.toml");
    fs::write(&path, "[build]\nvendor = [\"bootstrap\"]\n").unwrap();

    let (_config, warnings) = Config::load_with_warnings(&path).unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "vendor");
    assert_eq!(warnings[0].line, Some(2));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("vendors"));
}

#[test]
fn malformed_config_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pds.toml");
    fs::write(&path, "[build\nvendors = ").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("invalid configuration"));
}

#[test]
fn discover_prefers_explicit_path() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("pds.toml"), "[build]\ndist_dir = \"project\"\n").unwrap();
    let explicit = dir.path().join("other.toml");
    fs::write(&explicit, "[build]\ndist_dir = \"explicit\"\n").unwrap();

    let loaded = Config::discover(dir.path(), Some(&explicit)).unwrap();
    assert_eq!(loaded.source.as_deref(), Some(explicit.as_path()));
}

#[test]
fn discover_reads_project_config() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("pds.toml"), "[build]\nvendors = [\"bootstrap\"]\n").unwrap();

    let loaded = Config::discover(dir.path(), None).unwrap();
    assert_eq!(loaded.source, Some(dir.path().join("pds.toml")));
}

#[test]
fn discover_explicit_missing_file_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.toml");
    assert!(Config::discover(dir.path(), Some(&missing)).is_err());
}

#[test]
fn env_overrides_apply() {
    let config = with_env_overrides(
        Config::default(),
        env(&[
            ("PDS_DIST_DIR", "public"),
            ("PDS_VENDORS", "bootstrap, nyulibraries-assets"),
            ("PDS_IMAGE_STAGING", "dist"),
            ("PDS_COMPILE_STYLESHEETS", "0"),
            ("PDS_CREDENTIALS_FILE", "/secrets/figs.yml"),
            ("PDS_CAMPUS", "on"),
            ("PDS_VERBOSITY", "debug"),
        ]),
    );

    assert_eq!(config.build.dist_dir, PathBuf::from("public"));
    assert_eq!(config.build.vendors, vec!["bootstrap", "nyulibraries-assets"]);
    assert_eq!(config.build.image_staging, ImageStaging::Distribution);
    assert!(!config.build.compile_stylesheets);
    assert_eq!(
        config.harness.credentials_file,
        PathBuf::from("/secrets/figs.yml")
    );
    assert_eq!(config.harness.campus, Some(Campus::OnCampus));
    assert_eq!(config.output.verbosity, Verbosity::Debug);
}

#[test]
fn invalid_env_values_are_ignored() {
    let config = with_env_overrides(
        Config::default(),
        env(&[("PDS_IMAGE_STAGING", "sideways"), ("PDS_CAMPUS", "moon")]),
    );
    assert_eq!(config.build.image_staging, ImageStaging::WorkingTree);
    assert_eq!(config.harness.campus, None);
}

#[test]
fn verbosity_flags_only_raise_level() {
    assert_eq!(Verbosity::Normal.with_flags(0), Verbosity::Normal);
    assert_eq!(Verbosity::Normal.with_flags(1), Verbosity::Verbose);
    assert_eq!(Verbosity::Quiet.with_flags(3), Verbosity::Debug);
    assert_eq!(Verbosity::Debug.with_flags(1), Verbosity::Debug);
}

#[test]
fn shipped_config_loads_cleanly() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("pds.toml");
    let (config, warnings) = Config::load_with_warnings(&path).unwrap();

    assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
    assert_eq!(config.build.vendors, vec!["nyulibraries-assets"]);
    assert_eq!(config.build.image_staging, ImageStaging::WorkingTree);
    assert!(config.registry.contains_key("nyulibraries-assets"));
}
