//! Human-readable rendering
//!
//! Renderers return strings; the command layer decides where they go.

use std::fmt::Write as _;

use pds_site::application::build::BuildReport;
use pds_site::application::harness::{HarnessReport, ScenarioOutcome, ScenarioReport};
use pds_site::domain::asset::AssetKind;
use pds_site::domain::build_phase::BuildPhase;
use pds_site::domain::vendor::VendorPackage;
use pds_site::error::PdsError;

/// Status markers
#[derive(Debug, Clone, Copy)]
pub struct Icons {
    pub check: &'static str,
    pub cross: &'static str,
    pub skip: &'static str,
    pub arrow: &'static str,
}

impl Icons {
    pub fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
            skip: "○",
            arrow: "→",
        }
    }

    pub fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            skip: "[SKIP]",
            arrow: "->",
        }
    }

    pub fn detect() -> Self {
        if crate::ui::terminal::detect_capabilities().supports_unicode {
            Self::unicode()
        } else {
            Self::ascii()
        }
    }
}

pub fn render_phase(icons: &Icons, phase: BuildPhase) -> String {
    format!("{} {}", icons.arrow, phase.as_str().replace('_', " "))
}

pub fn render_build(icons: &Icons, report: &BuildReport, verbose: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} Built {} in {}ms",
        icons.check,
        report.dist_root.display(),
        report.duration_ms
    );
    if !report.vendors.is_empty() {
        let names: Vec<_> = report.vendors.iter().map(VendorPackage::name).collect();
        let _ = writeln!(out, "  vendors: {}", names.join(", "));
    }
    let _ = writeln!(
        out,
        "  {} stylesheet(s) compiled, {} script bundle(s)",
        report.stylesheets_compiled, report.scripts_bundled
    );
    for kind in AssetKind::ALL {
        let _ = writeln!(
            out,
            "  {}/: {} file(s)",
            kind.dir_name(),
            report.files_in(kind.dir_name()).count()
        );
    }
    if verbose {
        for file in &report.files {
            let _ = writeln!(out, "    {}  {}", file.hash, file.path.display());
        }
    }
    out
}

pub fn render_vendors(vendors: &[VendorPackage]) -> String {
    if vendors.is_empty() {
        return "No vendor packages configured\n".to_string();
    }
    let mut out = String::new();
    for vendor in vendors {
        let _ = writeln!(out, "{}", vendor.name());
        let _ = writeln!(out, "  stylesheets: {}", vendor.stylesheets_dir().display());
        let _ = writeln!(out, "  images:      {}", vendor.images_dir().display());
        let _ = writeln!(out, "  javascripts: {}", vendor.javascripts_dir().display());
    }
    out
}

pub fn render_scenario(icons: &Icons, report: &ScenarioReport) -> String {
    match &report.outcome {
        ScenarioOutcome::Passed => format!("{} {}\n", icons.check, report.name),
        ScenarioOutcome::Skipped { reason } => {
            format!("{} {} ({})\n", icons.skip, report.name, reason)
        }
        ScenarioOutcome::Failed {
            step_index,
            step,
            message,
        } => {
            let at = match (step_index, step) {
                (Some(index), Some(id)) => format!("step {} ({})", index + 1, id),
                _ => "setup".to_string(),
            };
            format!("{} {}\n    at {}: {}\n", icons.cross, report.name, at, message)
        }
    }
}

pub fn render_summary(report: &HarnessReport) -> String {
    format!(
        "\n{} scenario(s): {} passed, {} failed, {} skipped\n",
        report.scenarios.len(),
        report.passed(),
        report.failed(),
        report.skipped()
    )
}

/// Stable machine code for an error
pub fn error_code(err: &anyhow::Error) -> &'static str {
    match err.downcast_ref::<PdsError>() {
        Some(PdsError::UnknownVendor { .. }) => "UNKNOWN_VENDOR",
        Some(PdsError::StylesheetCompile { .. }) => "STYLESHEET_COMPILE",
        Some(PdsError::ScriptBundle { .. }) => "SCRIPT_BUNDLE",
        Some(PdsError::InvalidConfig { .. }) => "INVALID_CONFIG",
        Some(PdsError::InvalidScenarios { .. }) => "INVALID_SCENARIOS",
        Some(PdsError::DirectoryNotFound { .. }) => "DIRECTORY_NOT_FOUND",
        Some(PdsError::Fs(_)) | Some(PdsError::Io(_)) => "IO",
        Some(PdsError::Browser(_)) => "BROWSER",
        Some(PdsError::Credential(_)) => "CREDENTIALS",
        None => "ERROR",
    }
}

/// A fix suggestion, when one is known
pub fn error_help(err: &anyhow::Error) -> Option<String> {
    match err.downcast_ref::<PdsError>()? {
        PdsError::UnknownVendor { name, .. } => Some(format!(
            "Register it in pds.toml:\n  [registry.{}]\n  stylesheets_dir = \"path/to/assets/stylesheets\"",
            name
        )),
        PdsError::InvalidConfig { .. } => {
            Some("Check the setting against the documented pds.toml sections and build flags.".to_string())
        }
        PdsError::InvalidScenarios { .. } => Some(
            "Each scenario needs a name and a list of steps tagged with `step: <id>`.".to_string(),
        ),
        _ => None,
    }
}

pub fn render_error(icons: &Icons, err: &anyhow::Error) -> String {
    let mut out = format!("{} {}\n", icons.cross, err);
    for cause in err.chain().skip(1) {
        let _ = writeln!(out, "  caused by: {}", cause);
    }
    if let Some(help) = error_help(err) {
        let _ = writeln!(out, "\n{}", help);
    }
    out
}
