//! Reusable site content.

use super::TestEnv;

/// `pds.toml` registering one vendor package under `vendor/`
pub const SITE_CONFIG: &str = r#"
[build]
vendors = ["nyulibraries-assets"]

[registry.nyulibraries-assets]
stylesheets_dir = "vendor/nyulibraries-assets/lib/assets/stylesheets"
"#;

pub const VENDOR_ROOT: &str = "vendor/nyulibraries-assets/lib/assets";

/// A small site: one stylesheet importing a vendor partial, one script
/// requiring a vendor module, and local plus vendor images.
pub fn write_site(env: &TestEnv) {
    env.write_project_file("pds.toml", SITE_CONFIG);

    env.write_project_file(
        &format!("{}/stylesheets/_nyu.scss", VENDOR_ROOT),
        "$violet: #57068c;\n",
    );
    env.write_project_file(&format!("{}/images/logo.png", VENDOR_ROOT), "logo");
    env.write_project_file(
        &format!("{}/javascripts/jquery.js", VENDOR_ROOT),
        "window.jQuery = {};\n",
    );

    env.write_project_file(
        "assets/sass/pds.scss",
        "@import \"nyu\";\nheader { color: $violet; }\n",
    );
    env.write_project_file("assets/images/banner.png", "banner");
    env.write_project_file(
        "assets/javascripts/pds.js",
        "//= require jquery\nwindow.pds = true;\n",
    );
}
