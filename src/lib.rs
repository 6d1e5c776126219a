//! glue-env - provision a local AWS Glue + Jupyter Lab sandbox
//!
//! glue-env builds a container image bundling the AWS Glue libraries and
//! Jupyter Lab, starts it with the notebook and Spark UI ports published,
//! waits until Jupyter Lab answers, and seeds a welcome notebook into the
//! mounted workspace.
//!
//! # Example
//!
//! ```no_run
//! use glue_env::{Bootstrapper, BootstrapConfig, DockerCli, HttpProbe, SystemClock};
//!
//! let config = BootstrapConfig::default();
//! let runtime = DockerCli::new(&config.runtime);
//! let probe = HttpProbe::new(config.probe_timeout()).unwrap();
//! let report = Bootstrapper::new(&config, &runtime, &probe, &SystemClock).run();
//! assert!(report.success());
//! ```

pub mod bootstrap;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod output;
pub mod probe;
pub mod runtime;
pub mod workspace;

pub use bootstrap::{cleanup, BootstrapReport, Bootstrapper, CleanupOutcome, Stage};
pub use clock::{Clock, SystemClock};
pub use config::{BootstrapConfig, ConfigOverrides, HostPorts};
pub use error::{GlueError, Result};
pub use output::{format_cleanup, format_config, format_report, OutputFormat};
pub use probe::{HealthProbe, HttpProbe};
pub use runtime::{ContainerRuntime, DockerCli, Mount, PortBinding, RunSpec};
pub use workspace::Workspace;
