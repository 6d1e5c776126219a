//! Bootstrap configuration
//!
//! Every value the bootstrapper uses lives in [`BootstrapConfig`]. The
//! defaults reproduce the stock sandbox (image `glue-jupyter:local`,
//! container `glue_dev`, ports 8888/4040). A TOML file and command-line
//! flags can override any field.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{GlueError, Result};

/// Working directory inside the container; the workspace is mounted here.
pub const CONTAINER_WORKDIR: &str = "/home/glue_user/workspace";

/// Port Jupyter Lab listens on inside the container.
pub const NOTEBOOK_CONTAINER_PORT: u16 = 8888;

/// Port the Spark UI listens on inside the container.
pub const MONITOR_CONTAINER_PORT: u16 = 4040;

/// Host-side port bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostPorts {
    /// Host port published for Jupyter Lab
    pub notebook: u16,
    /// Host port published for the Spark UI
    pub monitor: u16,
}

impl Default for HostPorts {
    fn default() -> Self {
        Self {
            notebook: NOTEBOOK_CONTAINER_PORT,
            monitor: MONITOR_CONTAINER_PORT,
        }
    }
}

/// Everything the bootstrapper needs to know
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Container runtime binary (docker, podman, ...)
    pub runtime: String,
    /// Host directory mounted into the container
    pub workspace_dir: PathBuf,
    /// Tag given to the built image
    pub image_tag: String,
    /// Name given to the container instance
    pub container_name: String,
    /// Upper bound on liveness probes before giving up
    pub max_liveness_attempts: u32,
    /// Delay between failed liveness probes, in seconds
    pub poll_interval_secs: u64,
    /// Delay between container start and the first state check, in seconds
    pub init_delay_secs: u64,
    /// Per-request timeout of the liveness probe, in seconds
    pub probe_timeout_secs: u64,
    pub host_ports: HostPorts,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            runtime: "docker".to_string(),
            workspace_dir: PathBuf::from("glue_workspace"),
            image_tag: "glue-jupyter:local".to_string(),
            container_name: "glue_dev".to_string(),
            max_liveness_attempts: 30,
            poll_interval_secs: 2,
            init_delay_secs: 10,
            probe_timeout_secs: 5,
            host_ports: HostPorts::default(),
        }
    }
}

/// Values supplied on the command line; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub runtime: Option<String>,
    pub workspace_dir: Option<PathBuf>,
    pub image_tag: Option<String>,
    pub container_name: Option<String>,
    pub notebook_port: Option<u16>,
    pub monitor_port: Option<u16>,
    pub max_liveness_attempts: Option<u32>,
    pub poll_interval_secs: Option<u64>,
    pub init_delay_secs: Option<u64>,
    pub probe_timeout_secs: Option<u64>,
}

impl BootstrapConfig {
    /// Load a configuration file. Missing keys take their default value.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            GlueError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&text)
            .map_err(|e| GlueError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse a configuration from TOML text
    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| GlueError::Config(e.to_string()))
    }

    /// Apply command-line overrides on top of this configuration
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(runtime) = overrides.runtime {
            self.runtime = runtime;
        }
        if let Some(dir) = overrides.workspace_dir {
            self.workspace_dir = dir;
        }
        if let Some(tag) = overrides.image_tag {
            self.image_tag = tag;
        }
        if let Some(name) = overrides.container_name {
            self.container_name = name;
        }
        if let Some(port) = overrides.notebook_port {
            self.host_ports.notebook = port;
        }
        if let Some(port) = overrides.monitor_port {
            self.host_ports.monitor = port;
        }
        if let Some(attempts) = overrides.max_liveness_attempts {
            self.max_liveness_attempts = attempts;
        }
        if let Some(secs) = overrides.poll_interval_secs {
            self.poll_interval_secs = secs;
        }
        if let Some(secs) = overrides.init_delay_secs {
            self.init_delay_secs = secs;
        }
        if let Some(secs) = overrides.probe_timeout_secs {
            self.probe_timeout_secs = secs;
        }
    }

    /// Reject values the container runtime would refuse or that make the
    /// liveness loop meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.runtime.trim().is_empty() {
            return Err(GlueError::Config("runtime binary must not be empty".to_string()));
        }

        if self.workspace_dir.as_os_str().is_empty() {
            return Err(GlueError::Config("workspace_dir must not be empty".to_string()));
        }

        let name_re = regex::Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9_.-]*$")
            .map_err(|e| GlueError::Config(e.to_string()))?;
        if !name_re.is_match(&self.container_name) {
            return Err(GlueError::Config(format!(
                "invalid container name '{}'",
                self.container_name
            )));
        }

        let image_re = regex::Regex::new(
            r"^(?:[a-zA-Z0-9.-]+(?::[0-9]+)?/)?[a-z0-9]+(?:[._/-]+[a-z0-9]+)*(?::[A-Za-z0-9_][A-Za-z0-9_.-]{0,127})?$",
        )
        .map_err(|e| GlueError::Config(e.to_string()))?;
        if !image_re.is_match(&self.image_tag) {
            return Err(GlueError::Config(format!(
                "invalid image tag '{}'",
                self.image_tag
            )));
        }

        let HostPorts { notebook, monitor } = self.host_ports;
        if notebook == 0 || monitor == 0 {
            return Err(GlueError::Config("host ports must be non-zero".to_string()));
        }
        if notebook == monitor {
            return Err(GlueError::Config(format!(
                "notebook and monitor ports must differ (both {})",
                notebook
            )));
        }

        if self.max_liveness_attempts == 0 {
            return Err(GlueError::Config(
                "max_liveness_attempts must be at least 1".to_string(),
            ));
        }

        if self.probe_timeout_secs == 0 {
            return Err(GlueError::Config(
                "probe_timeout_secs must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn init_delay(&self) -> Duration {
        Duration::from_secs(self.init_delay_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    /// URL polled for liveness; also where users open Jupyter Lab
    pub fn notebook_url(&self) -> String {
        format!("http://localhost:{}", self.host_ports.notebook)
    }

    /// URL of the Spark UI
    pub fn monitor_url(&self) -> String {
        format!("http://localhost:{}", self.host_ports.monitor)
    }
}
