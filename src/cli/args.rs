//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ConfigOverrides;

#[derive(Parser, Debug)]
#[command(name = "glue-env")]
#[command(author, version, about = "Provision a local AWS Glue + Jupyter Lab development container", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: SubCommand,

    /// Configuration file (TOML)
    #[arg(long = "config", short = 'c', global = true, env = "GLUE_ENV_CONFIG", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Container runtime binary
    #[arg(long, global = true, env = "GLUE_ENV_RUNTIME")]
    pub runtime: Option<String>,

    /// Host directory mounted into the container
    #[arg(long, global = true, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    /// Image tag to build
    #[arg(long, global = true, value_name = "TAG")]
    pub image: Option<String>,

    /// Container name
    #[arg(long, global = true)]
    pub name: Option<String>,

    /// Host port for Jupyter Lab
    #[arg(long, global = true, value_name = "PORT")]
    pub notebook_port: Option<u16>,

    /// Host port for the Spark UI
    #[arg(long, global = true, value_name = "PORT")]
    pub monitor_port: Option<u16>,

    /// Maximum liveness probes before giving up
    #[arg(long, global = true, value_name = "N")]
    pub max_attempts: Option<u32>,

    /// Seconds between liveness probes
    #[arg(long, global = true, value_name = "SECS")]
    pub poll_interval: Option<u64>,

    /// Seconds to wait after start before checking the container
    #[arg(long, global = true, value_name = "SECS")]
    pub init_delay: Option<u64>,

    /// Per-probe HTTP timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub probe_timeout: Option<u64>,
}

impl Args {
    /// Flags that override the configuration file
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            runtime: self.runtime.clone(),
            workspace_dir: self.workspace.clone(),
            image_tag: self.image.clone(),
            container_name: self.name.clone(),
            notebook_port: self.notebook_port,
            monitor_port: self.monitor_port,
            max_liveness_attempts: self.max_attempts,
            poll_interval_secs: self.poll_interval,
            init_delay_secs: self.init_delay,
            probe_timeout_secs: self.probe_timeout,
        }
    }
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum SubCommand {
    /// Build the image, start the container and wait for Jupyter Lab
    Up,

    /// Remove the container and its image
    Down {
        /// Leave the image in place
        #[arg(long)]
        keep_image: bool,
    },

    /// Show the container's state
    Status,

    /// Print the container's logs
    Logs,

    /// Write the Dockerfile and sample notebook without touching the runtime
    Prepare,

    /// Print the resolved configuration
    Config,
}
