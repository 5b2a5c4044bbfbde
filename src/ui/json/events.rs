//! NDJSON event shapes
//!
//! Every event carries `event` and `command`; consumers switch on `event`.

use serde::Serialize;

use pds_site::application::harness::ScenarioReport;
use pds_site::domain::build_phase::BuildPhase;

#[derive(Debug, Clone, Serialize)]
pub struct StartEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    pub version: &'static str,
}

impl<'a> StartEvent<'a> {
    pub fn new(command: &'a str) -> Self {
        Self {
            event: "start",
            command,
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Build state transition.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    pub phase: BuildPhase,
}

impl<'a> PhaseEvent<'a> {
    pub fn new(command: &'a str, phase: BuildPhase) -> Self {
        Self {
            event: "phase",
            command,
            phase,
        }
    }
}

/// One finished scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    #[serde(flatten)]
    pub report: &'a ScenarioReport,
}

impl<'a> ScenarioEvent<'a> {
    pub fn new(command: &'a str, report: &'a ScenarioReport) -> Self {
        Self {
            event: "scenario",
            command,
            report,
        }
    }
}

/// Command payload, flattened next to `event` and `command`.
#[derive(Debug, Clone, Serialize)]
pub struct DataEvent<'a, T: Serialize> {
    pub event: &'static str,
    pub command: &'a str,
    #[serde(flatten)]
    pub data: T,
}

impl<'a, T: Serialize> DataEvent<'a, T> {
    pub fn new(command: &'a str, data: T) -> Self {
        Self {
            event: "data",
            command,
            data,
        }
    }
}

/// Always the last event of a run.
#[derive(Debug, Clone, Serialize)]
pub struct CompleteEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl<'a> CompleteEvent<'a> {
    pub fn success(command: &'a str) -> Self {
        Self {
            event: "complete",
            command,
            success: true,
            duration_ms: None,
        }
    }

    pub fn failure(command: &'a str) -> Self {
        Self {
            event: "complete",
            command,
            success: false,
            duration_ms: None,
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

/// A command failed; `code` is stable, `message` is not.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    pub code: &'a str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl<'a> ErrorEvent<'a> {
    pub fn new(command: &'a str, code: &'a str, message: impl Into<String>) -> Self {
        Self {
            event: "error",
            command,
            code,
            message: message.into(),
            help: None,
        }
    }

    pub fn with_help(mut self, help: Option<String>) -> Self {
        self.help = help;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pds_site::application::harness::ScenarioOutcome;

    #[test]
    fn start_event_carries_version() {
        let event = StartEvent::new("build");
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["event"], "start");
        assert_eq!(json["command"], "build");
        assert!(json["version"].is_string());
    }

    #[test]
    fn phase_event_uses_snake_case() {
        let json = serde_json::to_value(PhaseEvent::new("build", BuildPhase::CompilingStyles)).unwrap();
        assert_eq!(json["phase"], "compiling_styles");
    }

    #[test]
    fn scenario_event_flattens_outcome() {
        let report = ScenarioReport {
            name: "EZBorrow denial".to_string(),
            outcome: ScenarioOutcome::Skipped {
                reason: "requires on campus".to_string(),
            },
            steps_run: 0,
            duration_ms: 3,
        };
        let event = ScenarioEvent::new("scenarios", &report);
        insta::assert_json_snapshot!(event, @r###"
        {
          "event": "scenario",
          "command": "scenarios",
          "name": "EZBorrow denial",
          "outcome": {
            "status": "skipped",
            "reason": "requires on campus"
          },
          "steps_run": 0,
          "duration_ms": 3
        }
        "###);
    }

    #[test]
    fn failed_run_reports_duration() {
        let event = CompleteEvent::failure("scenarios").with_duration(1234);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["duration_ms"], 1234);
    }

    #[test]
    fn error_event_omits_missing_help() {
        let event = ErrorEvent::new("build", "UNKNOWN_VENDOR", "unknown vendor 'x'");
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["code"], "UNKNOWN_VENDOR");
        assert!(json.get("help").is_none());
    }
}
