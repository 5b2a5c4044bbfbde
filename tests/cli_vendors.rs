mod common;

use common::*;

#[test]
fn vendors_lists_sibling_directories() {
    let env = TestEnv::new();
    write_site(&env);

    let result = env.run(&["vendors"]);
    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("nyulibraries-assets"));
    assert!(result.stdout.contains("stylesheets/../images"));
}

#[test]
fn vendors_json_lists_resolved_paths() {
    let env = TestEnv::new();
    write_site(&env);

    let result = env.run(&["--json", "vendors"]);
    assert!(result.success, "{}", result.combined_output());

    let data = &result.events_named("data")[0];
    let vendor = &data["vendors"][0];
    assert_eq!(vendor["name"], "nyulibraries-assets");
    assert!(vendor["javascripts"]
        .as_str()
        .unwrap()
        .ends_with("stylesheets/../javascripts"));
}

#[test]
fn unknown_config_key_warns_with_suggestion() {
    let env = TestEnv::new();
    write_site(&env);
    env.write_project_file(
        "pds.toml",
        "[build]\nvendor = [\"nyulibraries-assets\"]\n",
    );

    let result = env.run(&["vendors"]);
    assert!(result.success, "{}", result.combined_output());
    assert!(
        result.stderr.contains("unknown config key 'vendor'"),
        "stderr:\n{}",
        result.stderr
    );
    assert!(result.stderr.contains("vendors"));
}

#[test]
fn malformed_config_is_an_error() {
    let env = TestEnv::new();
    env.write_project_file("pds.toml", "[build\n");

    let result = env.run(&["vendors"]);
    assert!(!result.success);
    assert!(result.stderr.contains("pds.toml"), "stderr:\n{}", result.stderr);
}
