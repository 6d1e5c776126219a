//! Bootstrap stages and the run report

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::BootstrapConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Start,
    Cleanup,
    Building,
    Built,
    BuildFailed,
    Starting,
    Started,
    StartFailed,
    WaitingInit,
    CheckingState,
    Running,
    StateCheckFailed,
    PollingLiveness,
    Ready,
    LivenessTimeout,
    SeedingArtifact,
    Done,
    /// Unexpected failure outside the container steps (workspace I/O, ...)
    Aborted,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Stage::BuildFailed
                | Stage::StartFailed
                | Stage::StateCheckFailed
                | Stage::LivenessTimeout
                | Stage::Done
                | Stage::Aborted
        )
    }

    pub fn is_failure(self) -> bool {
        self.is_terminal() && self != Stage::Done
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::Cleanup => "cleanup",
            Stage::Building => "building",
            Stage::Built => "built",
            Stage::BuildFailed => "build failed",
            Stage::Starting => "starting",
            Stage::Started => "started",
            Stage::StartFailed => "start failed",
            Stage::WaitingInit => "waiting for init",
            Stage::CheckingState => "checking state",
            Stage::Running => "running",
            Stage::StateCheckFailed => "state check failed",
            Stage::PollingLiveness => "polling liveness",
            Stage::Ready => "ready",
            Stage::LivenessTimeout => "liveness timeout",
            Stage::SeedingArtifact => "seeding notebook",
            Stage::Done => "done",
            Stage::Aborted => "aborted",
        };
        write!(f, "{}", name)
    }
}

/// Everything observed during one bootstrap run
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapReport {
    /// Stages in the order they were entered
    pub stages: Vec<Stage>,
    pub container_name: String,
    pub image_tag: String,
    pub workspace: PathBuf,
    pub notebook_url: String,
    pub monitor_url: String,
    pub container_id: Option<String>,
    /// Last state reported by the runtime
    pub container_state: Option<String>,
    pub liveness_attempts: u32,
    pub notebook_path: Option<PathBuf>,
    pub error: Option<String>,
    /// Runtime status listing, captured on success
    pub status: Option<String>,
    /// Container log stream, when it could be fetched
    pub logs: Option<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl BootstrapReport {
    pub fn new(config: &BootstrapConfig) -> Self {
        Self {
            stages: Vec::new(),
            container_name: config.container_name.clone(),
            image_tag: config.image_tag.clone(),
            workspace: config.workspace_dir.clone(),
            notebook_url: config.notebook_url(),
            monitor_url: config.monitor_url(),
            container_id: None,
            container_state: None,
            liveness_attempts: 0,
            notebook_path: None,
            error: None,
            status: None,
            logs: None,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn enter(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    /// The last stage entered
    pub fn stage(&self) -> Stage {
        self.stages.last().copied().unwrap_or(Stage::Start)
    }

    pub fn reached(&self, stage: Stage) -> bool {
        self.stages.contains(&stage)
    }

    pub fn success(&self) -> bool {
        self.stage() == Stage::Done
    }

    pub fn elapsed(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|end| end - self.started_at)
    }
}
