//! Deployment descriptor tool.
//!
//! ```text
//! deploy-descriptors [--config tool.toml] parse <file> [--section messaging]
//! deploy-descriptors [--config tool.toml] deploy <file> [--name shop] [--config-dir dir] [--watch]
//! ```
//!
//! Results are printed to stdout as JSON; logs go to stderr.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_yaml::Value;

use deploy_descriptors::config::loader::load_config_or_default;
use deploy_descriptors::config::watcher::DescriptorWatcher;
use deploy_descriptors::deployment::unit_name_for;
use deploy_descriptors::observability::logging;
use deploy_descriptors::{messaging, Descriptor, DescriptorPipeline};

#[derive(Parser)]
#[command(name = "deploy-descriptors")]
#[command(about = "Normalize deployment descriptors into deployment metadata", long_about = None)]
struct Cli {
    /// Tool configuration file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a messaging document into subscriptions
    Parse {
        file: PathBuf,

        /// Read this section of a combined descriptor instead of the whole file
        #[arg(short, long)]
        section: Option<String>,
    },
    /// Run the full descriptor pipeline
    Deploy {
        file: PathBuf,

        /// Deployment unit name (defaults to the file stem)
        #[arg(short, long)]
        name: Option<String>,

        /// Directory holding standalone section files
        #[arg(long)]
        config_dir: Option<PathBuf>,

        /// Redeploy whenever the descriptor or a standalone section file changes
        #[arg(short, long)]
        watch: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = load_config_or_default(cli.config.as_deref())?;
    logging::init(&config.logging)?;

    tracing::info!("deploy-descriptors v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Parse { file, section } => {
            let data = match section {
                Some(section) => Descriptor::load(&file)?
                    .section(&section)
                    .cloned()
                    .unwrap_or(Value::Null),
                None => Value::String(std::fs::read_to_string(&file)?),
            };
            let subscriptions = messaging::parse(&data)?;
            println!("{}", serde_json::to_string_pretty(&subscriptions)?);
        }
        Commands::Deploy { file, name, config_dir, watch } => {
            if config_dir.is_some() {
                config.deployment.config_dir = config_dir;
            }
            let name = name.unwrap_or_else(|| unit_name_for(&file).to_string());
            let pipeline = DescriptorPipeline::new(&config.deployment);
            let unit = pipeline.deploy_path(&name, &file)?;
            println!("{}", serde_json::to_string_pretty(&unit)?);

            if watch {
                let (watcher, mut updates) =
                    DescriptorWatcher::new(&file, &name, &config.deployment, &config.watch);
                let _guard = watcher.run()?;

                loop {
                    tokio::select! {
                        Some(unit) = updates.recv() => {
                            println!("{}", serde_json::to_string_pretty(&unit)?);
                        }
                        _ = tokio::signal::ctrl_c() => {
                            tracing::info!("Interrupt received, stopping watcher");
                            break;
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
