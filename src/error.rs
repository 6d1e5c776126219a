//! Error types for glue-env

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlueError {
    #[error("Image build failed: {0}")]
    Build(String),

    #[error("Container start failed: {0}")]
    Start(String),

    #[error("Container not running (state: '{state}')")]
    NotRunning { state: String },

    #[error("Jupyter Lab not responding at {url} after {attempts} attempts")]
    LivenessTimeout { url: String, attempts: u32 },

    #[error("Container runtime error: {0}")]
    Runtime(String),

    #[error("Cannot launch container runtime {0}")]
    Launch(String),

    #[error("Health probe error: {0}")]
    Probe(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Workspace error: {0}")]
    Workspace(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GlueError>;
