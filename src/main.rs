//! Paydash main entry point

use anyhow::Context;
use clap::Parser;
use paydash_api::{start_server, AppState};
use paydash_config::{Config, ConfigError};
use paydash_core::build_source;
use std::path::PathBuf;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "paydash")]
#[command(author = "Paydash Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A minimal admin dashboard for browsing payment transactions", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration file and exit
    #[arg(long)]
    print_default_config: bool,
}

fn load_config(path: &PathBuf) -> anyhow::Result<(Config, bool)> {
    match Config::load(path) {
        Ok(config) => Ok((config, true)),
        Err(ConfigError::FileNotFound { .. }) => Ok((Config::default(), false)),
        Err(e) => {
            let hint = e.suggestion().unwrap_or_default();
            Err(anyhow::Error::new(e).context(format!(
                "failed to load {}. {}",
                path.display(),
                hint
            )))
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (config, from_file) = load_config(&args.config)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if from_file {
        log::info!("Config loaded from {}", args.config.display());
    } else {
        log::warn!(
            "Config file not found: {}, using defaults",
            args.config.display()
        );
    }

    let source = build_source(&config.data);
    let state = AppState::new(config, source).context("invalid configuration")?;

    let rt = Runtime::new()?;
    rt.block_on(start_server(state))?;

    Ok(())
}
