mod common;

use common::*;

const CAMPUS_ONLY: &str = r#"
scenarios:
  - name: On campus EZBorrow
    given:
      campus: on_campus
    steps:
      - step: visit
        url: http://127.0.0.1:9/ezborrow
      - step: expect_ezborrow_denied
  - name: Off campus EZProxy
    given:
      campus: off_campus
      logged_out: true
    steps:
      - step: visit
        url: http://127.0.0.1:9/ezproxy
      - step: expect_login_screen
"#;

#[test]
fn scenarios_for_another_campus_are_skipped() {
    let env = TestEnv::new();
    env.write_project_file("features/campus.yml", CAMPUS_ONLY);

    let result = env.run(&[
        "--json",
        "scenarios",
        "features/campus.yml",
        "--campus",
        "on",
        "--scenario",
        "Off campus",
    ]);
    assert!(result.success, "{}", result.combined_output());

    let scenarios = result.events_named("scenario");
    assert_eq!(scenarios.len(), 1);
    assert_eq!(scenarios[0]["name"], "Off campus EZProxy");
    assert_eq!(scenarios[0]["outcome"]["status"], "skipped");
}

#[test]
fn unreachable_site_fails_the_scenario() {
    let env = TestEnv::new();
    env.write_project_file("features/campus.yml", CAMPUS_ONLY);

    let result = env.run_with_env(
        &["--json", "scenarios", "features/campus.yml"],
        &[("PDS_CAMPUS", "off")],
    );
    assert!(!result.success);
    assert_eq!(result.exit_code, 1);

    let scenarios = result.events_named("scenario");
    assert_eq!(scenarios[0]["outcome"]["status"], "skipped");
    assert_eq!(scenarios[1]["outcome"]["status"], "failed");
    assert_eq!(scenarios[1]["outcome"]["step"], "visit");
    assert_eq!(scenarios[1]["outcome"]["step_index"], 0);
    assert_eq!(result.events_named("complete")[0]["success"], false);
}

#[test]
fn invalid_scenario_file_is_reported() {
    let env = TestEnv::new();
    env.write_project_file(
        "features/bad.yml",
        "scenarios:\n  - name: typo\n    steps:\n      - step: vist\n        url: x\n",
    );

    let result = env.run(&["--json", "scenarios", "features/bad.yml"]);
    assert!(!result.success);
    let error = &result.events_named("error")[0];
    assert_eq!(error["code"], "INVALID_SCENARIOS");
    assert_eq!(error["command"], "scenarios");
}

#[test]
fn filter_matching_nothing_is_an_error() {
    let env = TestEnv::new();
    env.write_project_file("features/campus.yml", CAMPUS_ONLY);

    let result = env.run(&["scenarios", "features/campus.yml", "--scenario", "Bobcat"]);
    assert!(!result.success);
    assert!(result.stderr.contains("Bobcat"), "stderr:\n{}", result.stderr);
}
