//! Scenario files
//!
//! ```yaml
//! scenarios:
//!   - name: Off campus EZProxy login
//!     given: { campus: off_campus, logged_out: true }
//!     steps:
//!       - step: visit
//!         url: https://ezproxy.library.nyu.edu/login?url=https://jstor.org
//!       - step: expect_login_screen
//! ```

use std::path::Path;

use serde::Deserialize;
use serde_yaml_ng::Value;

use crate::domain::scenario::Scenario;
use crate::domain::step::StepId;
use crate::error::{PdsError, PdsResult};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioFile {
    pub scenarios: Vec<Scenario>,
}

/// Parse scenario YAML; `origin` names the source in errors
pub fn parse_scenarios(content: &str, origin: &Path) -> PdsResult<Vec<Scenario>> {
    let invalid = |message: String| PdsError::InvalidScenarios {
        file: origin.to_path_buf(),
        message,
    };

    let file: ScenarioFile =
        serde_yaml_ng::from_str(content).map_err(|e| invalid(e.to_string()))?;
    let raw: Value = serde_yaml_ng::from_str(content).map_err(|e| invalid(e.to_string()))?;
    check_step_keys(&raw).map_err(invalid)?;

    for (index, scenario) in file.scenarios.iter().enumerate() {
        if scenario.name.trim().is_empty() {
            return Err(invalid(format!("scenario #{} has no name", index + 1)));
        }
        if scenario.steps.is_empty() {
            return Err(invalid(format!("scenario '{}' has no steps", scenario.name)));
        }
    }
    Ok(file.scenarios)
}

/// Tagged enums ignore extra keys, so a misspelled argument would pass silently
fn check_step_keys(raw: &Value) -> Result<(), String> {
    let scenarios = raw
        .get("scenarios")
        .and_then(Value::as_sequence)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for scenario in scenarios {
        let name = scenario.get("name").and_then(Value::as_str).unwrap_or("?");
        let steps = scenario
            .get("steps")
            .and_then(Value::as_sequence)
            .map(Vec::as_slice)
            .unwrap_or_default();

        for (index, step) in steps.iter().enumerate() {
            let Some(mapping) = step.as_mapping() else {
                continue;
            };
            let Some(id) = step
                .get("step")
                .and_then(Value::as_str)
                .and_then(StepId::from_name)
            else {
                continue;
            };
            for key in mapping.keys() {
                let key = key.as_str().unwrap_or_default();
                if key != "step" && !id.arguments().contains(&key) {
                    return Err(format!(
                        "scenario '{name}' step #{} ({id}): unknown field `{key}`",
                        index + 1
                    ));
                }
            }
        }
    }
    Ok(())
}

pub fn load_scenarios(path: &Path) -> PdsResult<Vec<Scenario>> {
    let content = std::fs::read_to_string(path).map_err(|e| PdsError::InvalidScenarios {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_scenarios(&content, path)
}
