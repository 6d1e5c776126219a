//! Environment bootstrap
//!
//! A bootstrap run walks a fixed sequence of stages:
//!
//! ```text
//! Start → Cleanup → Building → Built → Starting → Started → WaitingInit
//!       → CheckingState → Running → PollingLiveness → Ready
//!       → SeedingArtifact → Done
//! ```
//!
//! Any failure ends the run in one of the terminal failure stages
//! (`BuildFailed`, `StartFailed`, `StateCheckFailed`, `LivenessTimeout`,
//! `Aborted`). Nothing is retried except the liveness probe.

mod bootstrapper;
mod report;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{GlueError, Result};
use crate::runtime::ContainerRuntime;

pub use bootstrapper::Bootstrapper;
pub use report::{BootstrapReport, Stage};

/// What a best-effort teardown actually removed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupOutcome {
    pub container_removed: bool,
    /// `None` when the image was deliberately left alone
    pub image_removed: Option<bool>,
    /// Set when the runtime binary itself could not be started
    pub runtime_unavailable: Option<String>,
}

/// Force-remove the container and, when given, the image.
///
/// Never fails: a missing container or image is the normal case on a
/// fresh machine, so errors are only logged.
pub fn cleanup(runtime: &dyn ContainerRuntime, container: &str, image: Option<&str>) -> CleanupOutcome {
    let mut runtime_unavailable = None;

    let container_removed = removed(
        runtime.remove_container(container),
        container,
        &mut runtime_unavailable,
    );
    let image_removed =
        image.map(|tag| removed(runtime.remove_image(tag), tag, &mut runtime_unavailable));

    CleanupOutcome {
        container_removed,
        image_removed,
        runtime_unavailable,
    }
}

fn removed(result: Result<()>, target: &str, unavailable: &mut Option<String>) -> bool {
    match result {
        Ok(()) => true,
        Err(GlueError::Launch(detail)) => {
            warn!(target, error = %detail, "container runtime could not be launched");
            unavailable.get_or_insert(detail);
            false
        }
        Err(e) => {
            debug!(target, error = %e, "nothing removed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use crate::runtime::RunSpec;

    /// Runtime whose every call fails with the same error
    struct FailingRuntime(fn() -> GlueError);

    impl ContainerRuntime for FailingRuntime {
        fn remove_container(&self, _name: &str) -> Result<()> {
            Err((self.0)())
        }
        fn remove_image(&self, _tag: &str) -> Result<()> {
            Err((self.0)())
        }
        fn build_image(&self, _tag: &str, _descriptor: &Path, _context: &Path) -> Result<()> {
            Err((self.0)())
        }
        fn run_container(&self, _spec: &RunSpec) -> Result<String> {
            Err((self.0)())
        }
        fn inspect_state(&self, _name: &str) -> Result<String> {
            Err((self.0)())
        }
        fn logs(&self, _name: &str) -> Result<String> {
            Err((self.0)())
        }
    }

    #[test]
    fn test_cleanup_of_absent_resources() {
        let runtime = FailingRuntime(|| GlueError::Runtime("No such container".to_string()));
        let outcome = cleanup(&runtime, "glue_dev", Some("glue-jupyter:local"));
        assert!(!outcome.container_removed);
        assert_eq!(outcome.image_removed, Some(false));
        assert!(outcome.runtime_unavailable.is_none());
    }

    #[test]
    fn test_cleanup_reports_unlaunchable_runtime() {
        let runtime = FailingRuntime(|| GlueError::Launch("'docker': No such file".to_string()));
        let outcome = cleanup(&runtime, "glue_dev", None);
        assert!(!outcome.container_removed);
        assert!(outcome.image_removed.is_none());
        assert_eq!(outcome.runtime_unavailable.as_deref(), Some("'docker': No such file"));
    }
}
