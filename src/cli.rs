// CLI definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "analogsense")]
#[command(
    author,
    version,
    about = "Analog key depth reader for Wooting, Razer and DrunkDeer keyboards"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file path (default: ~/.config/analogsense/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every HID interface on the system
    #[command(visible_aliases = ["hid", "d"])]
    Devices,

    /// Print the filters used to find supported keyboards
    #[command(visible_alias = "f")]
    Filters {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List connected analog keyboards
    #[command(visible_aliases = ["ls", "l"])]
    List,

    /// Print analog key depths until Ctrl+C
    #[command(visible_aliases = ["w", "depth"])]
    Watch {
        /// Print one JSON object per snapshot
        #[arg(long)]
        json: bool,

        /// Hide keys below this magnitude
        #[arg(short, long)]
        threshold: Option<f32>,

        /// Use the Nth matching interface instead of the first
        #[arg(short, long, value_name = "N")]
        index: Option<usize>,
    },

    /// Print the default config file location
    ConfigPath,

    /// Write a default config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
