//! Output formatting

use crate::bootstrap::{BootstrapReport, CleanupOutcome};
use crate::config::BootstrapConfig;
use crate::error::Result;
use crate::output::human;
use crate::output::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

pub fn format_report(report: &BootstrapReport, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Human => human::format_report(report),
        OutputFormat::Json => json::format_report(report),
    }
}

pub fn format_cleanup(outcome: &CleanupOutcome, config: &BootstrapConfig, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Human => human::format_cleanup(outcome, config),
        OutputFormat::Json => json::format_cleanup(outcome, config),
    }
}

pub fn format_config(config: &BootstrapConfig, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Human => config.to_toml_string(),
        OutputFormat::Json => Ok(json::format_config(config)),
    }
}
