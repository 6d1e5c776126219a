//! JSON output formatting

use serde_json::{json, Value};

use crate::bootstrap::{BootstrapReport, CleanupOutcome};
use crate::config::BootstrapConfig;

pub fn format_report(report: &BootstrapReport) -> String {
    let mut data = serde_json::to_value(report).unwrap_or(json!(null));
    if let Value::Object(map) = &mut data {
        map.insert("success".to_string(), json!(report.success()));
        map.insert("stage".to_string(), json!(report.stage()));
        if let Some(elapsed) = report.elapsed() {
            map.insert("elapsed_ms".to_string(), json!(elapsed.num_milliseconds()));
        }
    }
    serde_json::to_string_pretty(&data).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_cleanup(outcome: &CleanupOutcome, config: &BootstrapConfig) -> String {
    let data = json!({
        "container": config.container_name,
        "image": config.image_tag,
        "container_removed": outcome.container_removed,
        "image_removed": outcome.image_removed,
        "runtime_unavailable": outcome.runtime_unavailable,
    });
    serde_json::to_string_pretty(&data).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_config(config: &BootstrapConfig) -> String {
    serde_json::to_string_pretty(config).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::Stage;

    #[test]
    fn test_report_json_has_summary_fields() {
        let mut report = BootstrapReport::new(&BootstrapConfig::default());
        report.enter(Stage::Start);
        report.enter(Stage::Cleanup);
        report.enter(Stage::Building);
        report.enter(Stage::BuildFailed);
        report.error = Some("Image build failed: exit status 1".to_string());

        let value: Value = serde_json::from_str(&format_report(&report)).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["stage"], "build_failed");
        assert_eq!(value["container_name"], "glue_dev");
        assert_eq!(value["stages"].as_array().unwrap().len(), 4);
        assert!(value["logs"].is_null());
    }

    #[test]
    fn test_cleanup_json_flags_unavailable_runtime() {
        let outcome = CleanupOutcome {
            container_removed: false,
            image_removed: Some(false),
            runtime_unavailable: Some("'podman': No such file or directory".to_string()),
        };
        let value: Value =
            serde_json::from_str(&format_cleanup(&outcome, &BootstrapConfig::default())).unwrap();
        assert_eq!(value["container"], "glue_dev");
        assert_eq!(value["container_removed"], false);
        assert_eq!(value["runtime_unavailable"], "'podman': No such file or directory");
    }

    #[test]
    fn test_config_json() {
        let value: Value =
            serde_json::from_str(&format_config(&BootstrapConfig::default())).unwrap();
        assert_eq!(value["image_tag"], "glue-jupyter:local");
        assert_eq!(value["host_ports"]["notebook"], 8888);
    }
}
