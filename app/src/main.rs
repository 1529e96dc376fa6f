use anyhow::{bail, Context, Result};
use log::info;
use clap::{Parser, Subcommand};
use skaf_app::config::default_data_dir;
use skaf_app::{NodeConfig, SkafApp};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skafd")]
#[command(about = "SKAF monetary node", version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write genesis state into the data directory
    Init {
        /// Overwrite an existing genesis
        #[arg(long)]
        force: bool,
    },

    /// Print fee distribution and mint state as JSON
    Status,
}

fn load_config(path: Option<&PathBuf>) -> Result<NodeConfig> {
    match path {
        Some(path) => NodeConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(NodeConfig::default()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_ref())?;
    let data_dir = config.node.data_dir.get_or_insert_with(default_data_dir);
    info!(target: "app", "using data directory {}", data_dir.display());

    let app = SkafApp::new(config).context("opening node state")?;

    match cli.command {
        Commands::Init { force } => {
            if app.is_initialized()? && !force {
                bail!("genesis already written; pass --force to overwrite");
            }
            app.init_genesis()?;
            println!("{}", serde_json::to_string_pretty(&app.export_genesis()?)?);
        }
        Commands::Status => {
            if !app.is_initialized()? {
                bail!("node not initialized; run `skafd init` first");
            }
            println!("{}", serde_json::to_string_pretty(&app.status()?)?);
        }
    }

    Ok(())
}
