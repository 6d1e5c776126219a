//! Host-side workspace
//!
//! The workspace directory is bind-mounted into the container and holds
//! the generated build descriptor and the sample notebook. It is the only
//! state that survives a run.

mod descriptor;
mod notebook;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{GlueError, Result};

pub use descriptor::DOCKERFILE;
pub use notebook::{render_welcome_notebook, welcome_notebook};

/// File name of the generated build descriptor
pub const DESCRIPTOR_FILE: &str = "Dockerfile";

/// File name of the seeded sample notebook
pub const NOTEBOOK_FILE: &str = "welcome.ipynb";

#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Create a workspace handle. Relative paths are resolved against the
    /// current directory, since bind mounts need an absolute source.
    pub fn new(dir: &Path) -> Result<Self> {
        let root = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            std::env::current_dir()?.join(dir)
        };
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn descriptor_path(&self) -> PathBuf {
        self.root.join(DESCRIPTOR_FILE)
    }

    pub fn notebook_path(&self) -> PathBuf {
        self.root.join(NOTEBOOK_FILE)
    }

    /// Create the directory if it does not exist yet
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| {
            GlueError::Workspace(format!("cannot create {}: {}", self.root.display(), e))
        })?;
        debug!(path = %self.root.display(), "workspace ready");
        Ok(())
    }

    /// Write the Dockerfile, replacing any previous one
    pub fn write_build_descriptor(&self) -> Result<PathBuf> {
        let path = self.descriptor_path();
        self.write(&path, DOCKERFILE)?;
        Ok(path)
    }

    /// Write the welcome notebook, replacing any previous content
    pub fn write_sample_notebook(&self) -> Result<PathBuf> {
        let path = self.notebook_path();
        self.write(&path, &render_welcome_notebook()?)?;
        Ok(path)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        fs::write(path, contents).map_err(|e| {
            GlueError::Workspace(format!("cannot write {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), bytes = contents.len(), "wrote workspace file");
        Ok(())
    }
}
