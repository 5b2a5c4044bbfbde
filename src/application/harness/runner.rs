//! Scenario runner
//!
//! Scenarios run one after another against a single browser. The first
//! failing step halts its scenario; later scenarios still run.

use std::time::Instant;

use serde::Serialize;

use crate::domain::ports::{Browser, CredentialSource};
use crate::domain::scenario::{Campus, Scenario};
use crate::domain::step::StepId;

use super::registry::{StepContext, StepRegistry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScenarioOutcome {
    Passed,
    Failed {
        /// Zero-based index of the failing step; `None` when setup failed
        step_index: Option<usize>,
        step: Option<StepId>,
        message: String,
    },
    Skipped {
        reason: String,
    },
}

impl ScenarioOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, ScenarioOutcome::Failed { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScenarioOutcome::Passed => "passed",
            ScenarioOutcome::Failed { .. } => "failed",
            ScenarioOutcome::Skipped { .. } => "skipped",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub outcome: ScenarioOutcome,
    pub steps_run: usize,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HarnessReport {
    pub scenarios: Vec<ScenarioReport>,
}

impl HarnessReport {
    fn count(&self, label: &str) -> usize {
        self.scenarios
            .iter()
            .filter(|s| s.outcome.label() == label)
            .count()
    }

    pub fn passed(&self) -> usize {
        self.count("passed")
    }

    pub fn failed(&self) -> usize {
        self.count("failed")
    }

    pub fn skipped(&self) -> usize {
        self.count("skipped")
    }

    /// No scenario failed
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

pub struct ScenarioRunner<'r> {
    registry: &'r StepRegistry,
    campus: Option<Campus>,
    reset_between: bool,
}

impl<'r> ScenarioRunner<'r> {
    pub fn new(registry: &'r StepRegistry) -> Self {
        Self {
            registry,
            campus: None,
            reset_between: true,
        }
    }

    /// Where the harness is running from
    pub fn with_campus(mut self, campus: Option<Campus>) -> Self {
        self.campus = campus;
        self
    }

    /// Reset the session before every scenario, not only `logged_out` ones
    pub fn reset_between_scenarios(mut self, reset: bool) -> Self {
        self.reset_between = reset;
        self
    }

    /// Run every scenario; `on_report` sees each result as it completes
    pub fn run_all(
        &self,
        browser: &mut dyn Browser,
        credentials: &dyn CredentialSource,
        scenarios: &[Scenario],
        mut on_report: impl FnMut(&ScenarioReport),
    ) -> HarnessReport {
        let mut report = HarnessReport::default();
        for scenario in scenarios {
            let result = self.run(browser, credentials, scenario);
            on_report(&result);
            report.scenarios.push(result);
        }
        report
    }

    pub fn run(
        &self,
        browser: &mut dyn Browser,
        credentials: &dyn CredentialSource,
        scenario: &Scenario,
    ) -> ScenarioReport {
        let span = tracing::info_span!("scenario", name = %scenario.name);
        let _guard = span.enter();
        let started = Instant::now();

        let (outcome, steps_run) = self.execute(browser, credentials, scenario);
        match &outcome {
            ScenarioOutcome::Passed => tracing::info!("passed"),
            ScenarioOutcome::Failed { message, .. } => tracing::warn!(%message, "failed"),
            ScenarioOutcome::Skipped { reason } => tracing::info!(%reason, "skipped"),
        }

        ScenarioReport {
            name: scenario.name.clone(),
            outcome,
            steps_run,
            duration_ms: started.elapsed().as_millis() as u64,
        }
    }

    fn execute(
        &self,
        browser: &mut dyn Browser,
        credentials: &dyn CredentialSource,
        scenario: &Scenario,
    ) -> (ScenarioOutcome, usize) {
        if !scenario.given.satisfied_by(self.campus) {
            let reason = match (scenario.given.campus, self.campus) {
                (Some(required), Some(actual)) => {
                    format!("requires {}, running {}", required, actual)
                }
                (Some(required), None) => {
                    format!("requires {}, campus not configured", required)
                }
                (None, _) => "preconditions not met".to_string(),
            };
            return (ScenarioOutcome::Skipped { reason }, 0);
        }

        if self.reset_between || scenario.given.logged_out {
            if let Err(e) = browser.reset_session() {
                return (
                    ScenarioOutcome::Failed {
                        step_index: None,
                        step: None,
                        message: format!("cannot reset session: {}", e),
                    },
                    0,
                );
            }
        }

        let mut ctx = StepContext {
            browser,
            credentials,
        };
        for (index, step) in scenario.steps.iter().enumerate() {
            if let Err(e) = self.registry.run(&mut ctx, step) {
                return (
                    ScenarioOutcome::Failed {
                        step_index: Some(index),
                        step: Some(step.id()),
                        message: e.to_string(),
                    },
                    index + 1,
                );
            }
        }
        (ScenarioOutcome::Passed, scenario.steps.len())
    }
}
