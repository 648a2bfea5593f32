//! AnalogSense CLI
//!
//! Finds analog keyboards and prints their key depths.

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use analogsense::Config;

mod cli;
use cli::{Cli, Commands};

mod commands;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config_path = cli.config.unwrap_or_else(Config::default_path);

    // Config commands must work even when the file does not parse
    match cli.command {
        Some(Commands::ConfigPath) => return commands::config::config_path(&config_path),
        Some(Commands::InitConfig { force }) => {
            return commands::config::init_config(&config_path, force)
        }
        _ => {}
    }

    debug!("Loading config from {:?}", config_path);
    let config = Config::load(&config_path)?;

    match cli.command {
        None | Some(Commands::List) => commands::query::list(&config)?,
        Some(Commands::Devices) => commands::query::devices()?,
        Some(Commands::Filters { json }) => commands::query::filters(json)?,
        Some(Commands::Watch {
            json,
            threshold,
            index,
        }) => commands::watch::watch(&config, json, threshold, index).await?,
        Some(Commands::ConfigPath | Commands::InitConfig { .. }) => {}
    }

    Ok(())
}
