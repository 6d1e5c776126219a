//! Human-readable output formatting

use bytesize::ByteSize;

use crate::bootstrap::{BootstrapReport, CleanupOutcome};
use crate::config::BootstrapConfig;
use crate::workspace::NOTEBOOK_FILE;

pub fn format_report(report: &BootstrapReport) -> String {
    let mut output = String::new();

    if report.success() {
        output.push_str("Glue development environment started successfully!\n");
        output.push_str("----------------------------------------------------\n");
        output.push_str(&format!("Jupyter Lab:   {}\n", report.notebook_url));
        output.push_str(&format!("Spark UI:      {}\n", report.monitor_url));
        output.push_str(&format!("Workspace:     {}\n", report.workspace.display()));
        if let Some(ref id) = report.container_id {
            output.push_str(&format!("Container ID:  {}\n", id));
        }
        output.push_str(&format!(
            "Liveness:      ready after {} attempt(s)\n",
            report.liveness_attempts
        ));
        if let Some(elapsed) = report.elapsed() {
            output.push_str(&format!("Elapsed:       {}s\n", elapsed.num_seconds()));
        }
        output.push_str(&format!(
            "\nA sample notebook '{}' has been created in your workspace\n",
            NOTEBOOK_FILE
        ));

        output.push_str("\nContainer status\n----------------\n");
        match report.status {
            Some(ref status) => push_block(&mut output, status),
            None => output.push_str("(unavailable)\n"),
        }
    } else {
        output.push_str(&format!(
            "Error starting Glue environment: {}\n",
            report.error.as_deref().unwrap_or("unknown error")
        ));
        output.push_str(&format!("Failed at:     {}\n", report.stage()));
        output.push_str(&format!("Container:     {}\n", report.container_name));
        if let Some(ref state) = report.container_state {
            let shown = if state.is_empty() { "(none)" } else { state.as_str() };
            output.push_str(&format!("State:         {}\n", shown));
        }
        if report.liveness_attempts > 0 {
            output.push_str(&format!("Probes:        {}\n", report.liveness_attempts));
        }
    }

    match report.logs {
        Some(ref logs) => {
            let header = format!("Container logs ({})", ByteSize(logs.len() as u64));
            output.push_str(&format!("\n{}\n{}\n", header, "-".repeat(header.len())));
            push_block(&mut output, logs);
        }
        None => output.push_str("\nContainer logs\n--------------\n(unavailable)\n"),
    }

    output
}

pub fn format_cleanup(outcome: &CleanupOutcome, config: &BootstrapConfig) -> String {
    if let Some(ref detail) = outcome.runtime_unavailable {
        return format!(
            "Container runtime unavailable: {}\nNothing was removed ({}, {})\n",
            detail, config.container_name, config.image_tag
        );
    }

    let mut output = format!(
        "Container {}: {}\n",
        config.container_name,
        if outcome.container_removed { "removed" } else { "not present" }
    );
    match outcome.image_removed {
        Some(true) => output.push_str(&format!("Image {}: removed\n", config.image_tag)),
        Some(false) => output.push_str(&format!("Image {}: not present\n", config.image_tag)),
        None => output.push_str(&format!("Image {}: kept\n", config.image_tag)),
    }
    output
}

fn push_block(output: &mut String, text: &str) {
    if text.trim().is_empty() {
        output.push_str("(empty)\n");
        return;
    }
    output.push_str(text);
    if !text.ends_with('\n') {
        output.push('\n');
    }
}
