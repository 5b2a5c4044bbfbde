//! Scenarios and their declarative preconditions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::step::Step;

/// Network location the harness runs from
///
/// This is established outside the harness (proxy routing, VPN, runner
/// placement) and injected as an environment parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Campus {
    #[serde(alias = "on", alias = "on-campus")]
    OnCampus,
    #[serde(alias = "off", alias = "off-campus")]
    OffCampus,
}

impl fmt::Display for Campus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Campus::OnCampus => f.write_str("on campus"),
            Campus::OffCampus => f.write_str("off campus"),
        }
    }
}

impl FromStr for Campus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "on" | "on_campus" | "on-campus" => Ok(Campus::OnCampus),
            "off" | "off_campus" | "off-campus" => Ok(Campus::OffCampus),
            other => Err(format!("unknown campus '{}' (expected on or off)", other)),
        }
    }
}

/// What must hold before a scenario's first step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Preconditions {
    /// Required network location; `None` runs anywhere
    pub campus: Option<Campus>,
    /// Start from a fresh browser session
    pub logged_out: bool,
}

impl Preconditions {
    /// Whether the injected environment satisfies these preconditions
    pub fn satisfied_by(&self, environment: Option<Campus>) -> bool {
        match (self.campus, environment) {
            (None, _) => true,
            (Some(required), Some(actual)) => required == actual,
            (Some(_), None) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub given: Preconditions,
    pub steps: Vec<Step>,
}
