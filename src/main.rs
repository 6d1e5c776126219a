//! glue-env CLI - start a local Glue development environment

use anyhow::Context;
use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use glue_env::cli::{Args, SubCommand};
use glue_env::{
    cleanup, format_cleanup, format_config, format_report, BootstrapConfig, Bootstrapper,
    ContainerRuntime, DockerCli, HttpProbe, OutputFormat, SystemClock, Workspace,
};

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "glue_env=debug" } else { "glue_env=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(args: &Args) -> anyhow::Result<BootstrapConfig> {
    let mut config = match args.config_file {
        Some(ref path) => BootstrapConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => BootstrapConfig::default(),
    };
    config.apply(args.overrides());
    config.validate()?;
    Ok(config)
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    let format = if args.json { OutputFormat::Json } else { OutputFormat::Human };
    let runtime = DockerCli::new(&config.runtime);

    match args.command {
        SubCommand::Up => {
            let probe = HttpProbe::new(config.probe_timeout())?;
            let report = Bootstrapper::new(&config, &runtime, &probe, &SystemClock).run();
            println!("{}", format_report(&report, &format));
            if !report.success() {
                anyhow::bail!("environment not started (failed at: {})", report.stage());
            }
            Ok(())
        }

        SubCommand::Down { keep_image } => {
            let image = if keep_image { None } else { Some(config.image_tag.as_str()) };
            let outcome = cleanup(&runtime, &config.container_name, image);
            print!("{}", format_cleanup(&outcome, &config, &format));
            Ok(())
        }

        SubCommand::Status => {
            let state = runtime.inspect_state(&config.container_name).ok();
            let listing = runtime.status(&config.container_name).ok();
            match format {
                OutputFormat::Json => {
                    let data = json!({
                        "container": config.container_name,
                        "state": state,
                        "status": listing,
                    });
                    println!("{}", serde_json::to_string_pretty(&data)?);
                }
                OutputFormat::Human => {
                    println!(
                        "Container {}: {}",
                        config.container_name,
                        state.as_deref().unwrap_or("not found")
                    );
                    if let Some(listing) = listing {
                        print!("{}", listing);
                    }
                }
            }
            Ok(())
        }

        SubCommand::Logs => {
            let logs = runtime
                .logs(&config.container_name)
                .with_context(|| format!("fetching logs of {}", config.container_name))?;
            print!("{}", logs);
            Ok(())
        }

        SubCommand::Prepare => {
            let workspace = Workspace::new(&config.workspace_dir)?;
            workspace.prepare()?;
            let descriptor = workspace.write_build_descriptor()?;
            let notebook = workspace.write_sample_notebook()?;
            match format {
                OutputFormat::Json => {
                    let data = json!({
                        "workspace": workspace.root(),
                        "descriptor": descriptor,
                        "notebook": notebook,
                    });
                    println!("{}", serde_json::to_string_pretty(&data)?);
                }
                OutputFormat::Human => {
                    println!("Workspace:  {}", workspace.root().display());
                    println!("Dockerfile: {}", descriptor.display());
                    println!("Notebook:   {}", notebook.display());
                }
            }
            Ok(())
        }

        SubCommand::Config => {
            print!("{}", format_config(&config, &format)?);
            if format == OutputFormat::Json {
                println!();
            }
            Ok(())
        }
    }
}
