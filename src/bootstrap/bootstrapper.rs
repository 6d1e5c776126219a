//! The bootstrap routine

use std::path::Path;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use super::report::{BootstrapReport, Stage};
use crate::clock::Clock;
use crate::config::{BootstrapConfig, CONTAINER_WORKDIR, MONITOR_CONTAINER_PORT, NOTEBOOK_CONTAINER_PORT};
use crate::error::{GlueError, Result};
use crate::probe::HealthProbe;
use crate::runtime::{ContainerRuntime, Mount, PortBinding, RunSpec};
use crate::workspace::Workspace;

/// Provisions the sandbox container
pub struct Bootstrapper<'a> {
    config: &'a BootstrapConfig,
    runtime: &'a dyn ContainerRuntime,
    probe: &'a dyn HealthProbe,
    clock: &'a dyn Clock,
}

impl<'a> Bootstrapper<'a> {
    pub fn new(
        config: &'a BootstrapConfig,
        runtime: &'a dyn ContainerRuntime,
        probe: &'a dyn HealthProbe,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            config,
            runtime,
            probe,
            clock,
        }
    }

    /// Run every stage in order. Failures are recorded in the report
    /// together with whatever logs the container produced.
    pub fn run(&self) -> BootstrapReport {
        let mut report = BootstrapReport::new(self.config);
        report.enter(Stage::Start);
        info!(container = %self.config.container_name, image = %self.config.image_tag, "starting Glue development environment");

        match self.execute(&mut report) {
            Ok(()) => {
                report.enter(Stage::Done);
                info!(url = %self.config.notebook_url(), "Glue development environment started");
                report.status = self.runtime.status(&self.config.container_name).ok();
                report.logs = self.fetch_logs();
            }
            Err(e) => {
                if !report.stage().is_terminal() {
                    report.enter(Stage::Aborted);
                }
                error!(stage = %report.stage(), error = %e, "bootstrap failed");
                report.error = Some(e.to_string());
                report.logs = self.fetch_logs();
            }
        }

        report.finished_at = Some(Utc::now());
        report
    }

    fn execute(&self, report: &mut BootstrapReport) -> Result<()> {
        let workspace = Workspace::new(&self.config.workspace_dir)?;
        report.workspace = workspace.root().to_path_buf();
        workspace.prepare()?;
        let descriptor = workspace.write_build_descriptor()?;

        report.enter(Stage::Cleanup);
        // Result ignored: a fresh machine has nothing to remove.
        let _ = super::cleanup(
            self.runtime,
            &self.config.container_name,
            Some(self.config.image_tag.as_str()),
        );

        report.enter(Stage::Building);
        if let Err(e) = self.build(&workspace, &descriptor) {
            report.enter(Stage::BuildFailed);
            return Err(e);
        }
        report.enter(Stage::Built);

        report.enter(Stage::Starting);
        match self.start(&workspace) {
            Ok(id) => {
                info!(container_id = %id, "container started");
                report.container_id = Some(id);
                report.enter(Stage::Started);
            }
            Err(e) => {
                report.enter(Stage::StartFailed);
                return Err(e);
            }
        }

        report.enter(Stage::WaitingInit);
        info!(delay_secs = self.config.init_delay_secs, "waiting for container to initialize");
        self.clock.sleep(self.config.init_delay());

        report.enter(Stage::CheckingState);
        let state = self.container_state();
        info!(state = %state, "container status");
        report.container_state = Some(state.clone());
        if state != "running" {
            report.enter(Stage::StateCheckFailed);
            return Err(GlueError::NotRunning { state });
        }
        report.enter(Stage::Running);

        report.enter(Stage::PollingLiveness);
        match self.poll_liveness(report) {
            Ok(()) => report.enter(Stage::Ready),
            Err(e) => {
                report.enter(Stage::LivenessTimeout);
                return Err(e);
            }
        }

        report.enter(Stage::SeedingArtifact);
        report.notebook_path = Some(workspace.write_sample_notebook()?);
        Ok(())
    }

    fn build(&self, workspace: &Workspace, descriptor: &Path) -> Result<()> {
        info!(image = %self.config.image_tag, "building image (this might take a few minutes)");
        self.runtime
            .build_image(&self.config.image_tag, descriptor, workspace.root())
    }

    fn start(&self, workspace: &Workspace) -> Result<String> {
        let spec = RunSpec {
            name: self.config.container_name.clone(),
            image: self.config.image_tag.clone(),
            ports: vec![
                PortBinding::new(self.config.host_ports.notebook, NOTEBOOK_CONTAINER_PORT),
                PortBinding::new(self.config.host_ports.monitor, MONITOR_CONTAINER_PORT),
            ],
            mounts: vec![Mount {
                source: workspace.root().to_path_buf(),
                target: CONTAINER_WORKDIR.to_string(),
            }],
        };
        info!(container = %spec.name, "starting container");
        self.runtime.run_container(&spec)
    }

    /// Current state, or an empty string when the runtime cannot say
    fn container_state(&self) -> String {
        match self.runtime.inspect_state(&self.config.container_name) {
            Ok(state) => state.trim().to_string(),
            Err(e) => {
                warn!(error = %e, "cannot inspect container");
                String::new()
            }
        }
    }

    fn poll_liveness(&self, report: &mut BootstrapReport) -> Result<()> {
        let url = self.config.notebook_url();
        let max = self.config.max_liveness_attempts;
        info!(url = %url, max_attempts = max, "waiting for Jupyter Lab to start");

        for attempt in 1..=max {
            report.liveness_attempts = attempt;
            match self.probe.probe(&url) {
                Ok(()) => {
                    info!(attempt, "Jupyter Lab is ready");
                    return Ok(());
                }
                Err(e) => debug!(attempt, error = %e, "Jupyter Lab not responding yet"),
            }
            if attempt < max {
                self.clock.sleep(self.config.poll_interval());
            }
        }

        Err(GlueError::LivenessTimeout { url, attempts: max })
    }

    fn fetch_logs(&self) -> Option<String> {
        match self.runtime.logs(&self.config.container_name) {
            Ok(logs) => Some(logs),
            Err(e) => {
                debug!(error = %e, "container logs unavailable");
                None
            }
        }
    }
}
