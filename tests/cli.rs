use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn glue_env() -> Command {
    let mut cmd = Command::cargo_bin("glue-env").unwrap();
    cmd.env_remove("GLUE_ENV_CONFIG")
        .env_remove("GLUE_ENV_RUNTIME")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn help_lists_subcommands() {
    glue_env()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("up"))
        .stdout(predicate::str::contains("down"))
        .stdout(predicate::str::contains("prepare"));
}

#[test]
fn config_prints_defaults() {
    glue_env()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("container_name = \"glue_dev\""))
        .stdout(predicate::str::contains("image_tag = \"glue-jupyter:local\""))
        .stdout(predicate::str::contains("max_liveness_attempts = 30"));
}

#[test]
fn config_file_and_flags_are_layered() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("glue-env.toml");
    fs::write(&path, "container_name = \"from_file\"\ninit_delay_secs = 1\n").unwrap();

    let output = glue_env()
        .args(["--json", "config", "--config"])
        .arg(&path)
        .args(["--notebook-port", "18888"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["container_name"], "from_file");
    assert_eq!(value["init_delay_secs"], 1);
    assert_eq!(value["host_ports"]["notebook"], 18888);
    assert_eq!(value["host_ports"]["monitor"], 4040);
}

#[test]
fn invalid_config_is_rejected() {
    glue_env()
        .args(["config", "--name", "bad name"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn prepare_writes_workspace_files() {
    let dir = TempDir::new().unwrap();
    let ws = dir.path().join("glue_workspace");

    glue_env()
        .arg("prepare")
        .arg("--workspace")
        .arg(&ws)
        .assert()
        .success()
        .stdout(predicate::str::contains("welcome.ipynb"));

    let dockerfile = fs::read_to_string(ws.join("Dockerfile")).unwrap();
    assert!(dockerfile.contains("jupyterlab"));
    let notebook: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(ws.join("welcome.ipynb")).unwrap()).unwrap();
    assert_eq!(notebook["nbformat"], 4);
}

#[test]
fn up_reports_build_failure_when_runtime_is_missing() {
    let dir = TempDir::new().unwrap();
    let ws = dir.path().join("glue_workspace");

    glue_env()
        .args(["up", "--runtime", "glue-env-no-such-runtime", "--init-delay", "0"])
        .arg("--workspace")
        .arg(&ws)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Error starting Glue environment"))
        .stdout(predicate::str::contains("build failed"))
        .stdout(predicate::str::contains("(unavailable)"));

    // Descriptor is written before the build; the notebook is never seeded
    assert!(ws.join("Dockerfile").exists());
    assert!(!ws.join("welcome.ipynb").exists());
}

#[test]
fn up_json_report() {
    let dir = TempDir::new().unwrap();

    let output = glue_env()
        .args(["--json", "up", "--runtime", "glue-env-no-such-runtime"])
        .arg("--workspace")
        .arg(dir.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["success"], false);
    assert_eq!(value["stage"], "build_failed");
    assert!(value["container_id"].is_null());
}

/// Stand-in runtime: `build` chatters on stdout and succeeds, every
/// other command fails like a daemon that knows nothing.
#[cfg(unix)]
fn scripted_runtime(dir: &TempDir) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.path().join("fake-docker");
    fs::write(
        &path,
        "#!/bin/sh\n\
         if [ \"$1\" = build ]; then\n\
         echo 'Step 1/9 : FROM amazon/aws-glue-libs:glue_libs_4.0.0_image_01'\n\
         echo 'Successfully tagged glue-jupyter:local'\n\
         exit 0\n\
         fi\n\
         echo \"Error: No such object: glue_dev\" >&2\n\
         exit 1\n",
    )
    .unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
#[test]
fn up_json_stdout_stays_json_while_build_prints() {
    let bin = TempDir::new().unwrap();
    let runtime = scripted_runtime(&bin);
    let dir = TempDir::new().unwrap();

    let output = glue_env()
        .args(["--json", "up", "--runtime"])
        .arg(&runtime)
        .arg("--workspace")
        .arg(dir.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["stage"], "start_failed");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Step 1/9 : FROM amazon/aws-glue-libs"));
}

#[test]
fn down_reports_unlaunchable_runtime() {
    glue_env()
        .args(["down", "--runtime", "glue-env-no-such-runtime"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Container runtime unavailable"))
        .stdout(predicate::str::contains("glue-env-no-such-runtime"))
        .stdout(predicate::str::contains("not present").not());
}

#[cfg(unix)]
#[test]
fn down_tolerates_missing_resources() {
    let bin = TempDir::new().unwrap();
    let runtime = scripted_runtime(&bin);

    glue_env()
        .args(["down", "--runtime"])
        .arg(&runtime)
        .assert()
        .success()
        .stdout(predicate::str::contains("Container glue_dev: not present"))
        .stdout(predicate::str::contains("Image glue-jupyter:local: not present"));
}

#[test]
fn logs_fail_without_runtime() {
    glue_env()
        .args(["logs", "--runtime", "glue-env-no-such-runtime"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fetching logs of glue_dev"));
}
