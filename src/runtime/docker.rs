//! Docker-compatible CLI runtime

use std::path::Path;
use std::process::{Command, Output, Stdio};

use tracing::debug;

use super::{ContainerRuntime, RunSpec};
use crate::error::{GlueError, Result};

/// Drives a docker-compatible binary (`docker`, `podman`, ...)
#[derive(Debug, Clone)]
pub struct DockerCli {
    program: String,
}

impl DockerCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self, args: &[String]) -> Command {
        debug!(command = %format!("{} {}", self.program, args.join(" ")), "invoking container runtime");
        let mut cmd = Command::new(&self.program);
        cmd.args(args).stdin(Stdio::null());
        cmd
    }

    fn launch_error(&self, err: std::io::Error) -> GlueError {
        GlueError::Launch(format!("'{}': {}", self.program, err))
    }

    /// Run to completion capturing stdout and stderr
    fn capture(&self, args: &[String]) -> Result<Output> {
        self.command(args)
            .output()
            .map_err(|e| self.launch_error(e))
    }

    /// Run capturing output; a non-zero exit becomes an error built by `on_failure`
    fn checked(
        &self,
        args: &[String],
        on_failure: impl FnOnce(String) -> GlueError,
    ) -> Result<Output> {
        let output = self.capture(args)?;
        if output.status.success() {
            Ok(output)
        } else {
            Err(on_failure(failure_detail(&output)))
        }
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new("docker")
    }
}

fn failure_detail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let code = output
        .status
        .code()
        .map(|c| c.to_string())
        .unwrap_or_else(|| "signal".to_string());
    if stderr.trim().is_empty() {
        format!("exit status {}", code)
    } else {
        format!("exit status {}: {}", code, stderr.trim())
    }
}

fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn build_args(tag: &str, descriptor: &Path, context: &Path) -> Vec<String> {
    vec![
        "build".to_string(),
        "-t".to_string(),
        tag.to_string(),
        "-f".to_string(),
        descriptor.display().to_string(),
        context.display().to_string(),
    ]
}

pub(crate) fn run_args(spec: &RunSpec) -> Vec<String> {
    let mut args = strings(&["run", "-d", "--name"]);
    args.push(spec.name.clone());
    for port in &spec.ports {
        args.push("-p".to_string());
        args.push(format!("{}:{}", port.host, port.container));
    }
    for mount in &spec.mounts {
        args.push("-v".to_string());
        args.push(format!("{}:{}", mount.source.display(), mount.target));
    }
    args.push(spec.image.clone());
    args
}

impl ContainerRuntime for DockerCli {
    fn remove_container(&self, name: &str) -> Result<()> {
        self.checked(&strings(&["rm", "-f", name]), GlueError::Runtime)?;
        Ok(())
    }

    fn remove_image(&self, tag: &str) -> Result<()> {
        self.checked(&strings(&["rmi", "-f", tag]), GlueError::Runtime)?;
        Ok(())
    }

    fn build_image(&self, tag: &str, descriptor: &Path, context: &Path) -> Result<()> {
        // Build progress goes to the terminal on stderr; stdout carries the report.
        let status = self
            .command(&build_args(tag, descriptor, context))
            .stdout(std::io::stderr())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| self.launch_error(e))?;

        if status.success() {
            Ok(())
        } else {
            Err(GlueError::Build(match status.code() {
                Some(code) => format!("'{} build' exited with status {}", self.program, code),
                None => format!("'{} build' terminated by signal", self.program),
            }))
        }
    }

    fn run_container(&self, spec: &RunSpec) -> Result<String> {
        let output = self.checked(&run_args(spec), GlueError::Start)?;
        let id = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if id.is_empty() {
            return Err(GlueError::Start(
                "runtime did not report a container id".to_string(),
            ));
        }
        Ok(id)
    }

    fn inspect_state(&self, name: &str) -> Result<String> {
        let output = self.checked(
            &strings(&["inspect", "-f", "{{.State.Status}}", name]),
            GlueError::Runtime,
        )?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn logs(&self, name: &str) -> Result<String> {
        let output = self.checked(&strings(&["logs", name]), GlueError::Runtime)?;
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }

    fn status(&self, name: &str) -> Result<String> {
        let filter = format!("name={}", name);
        let output = self.checked(&strings(&["ps", "--filter", &filter]), GlueError::Runtime)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
