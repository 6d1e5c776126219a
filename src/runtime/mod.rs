//! Container runtime boundary
//!
//! The bootstrapper never talks to a container engine directly. It goes
//! through [`ContainerRuntime`], which [`DockerCli`] implements by shelling
//! out to any docker-compatible binary.

mod docker;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;

pub use docker::DockerCli;

/// A host port published to a container port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PortBinding {
    pub host: u16,
    pub container: u16,
}

impl PortBinding {
    pub fn new(host: u16, container: u16) -> Self {
        Self { host, container }
    }
}

/// A host directory bind-mounted into a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mount {
    pub source: PathBuf,
    pub target: String,
}

/// Everything needed to start a detached container
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSpec {
    pub name: String,
    pub image: String,
    pub ports: Vec<PortBinding>,
    pub mounts: Vec<Mount>,
}

/// Operations the bootstrapper needs from a container engine.
///
/// Implementations report a non-zero exit of the underlying command as an
/// error; callers decide whether that error matters.
pub trait ContainerRuntime {
    /// Force-remove a container by name
    fn remove_container(&self, name: &str) -> Result<()>;

    /// Force-remove an image by tag
    fn remove_image(&self, tag: &str) -> Result<()>;

    /// Build `tag` from `descriptor` using `context` as the build context
    fn build_image(&self, tag: &str, descriptor: &Path, context: &Path) -> Result<()>;

    /// Start a detached container and return its instance id
    fn run_container(&self, spec: &RunSpec) -> Result<String>;

    /// The container's state (`running`, `exited`, ...)
    fn inspect_state(&self, name: &str) -> Result<String>;

    /// The container's combined log stream
    fn logs(&self, name: &str) -> Result<String>;

    /// Human-readable status listing for the container
    fn status(&self, name: &str) -> Result<String> {
        self.inspect_state(name)
    }
}
