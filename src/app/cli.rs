//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// touchtrace - Chase the dominant press on a force panel with a pen plotter
#[derive(Parser, Debug)]
#[command(name = "touchtrace")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Follow the strongest press with the pen
    Run {
        /// Session duration in seconds (0 = until stopped)
        #[arg(short, long, default_value = "0")]
        duration: u64,

        /// Use the synthetic demo pad instead of panel hardware
        #[arg(long)]
        demo: bool,
    },

    /// Sweep a raster pass, pressure shifting the pen row
    Raster {
        /// Session duration in seconds (0 = until stopped)
        #[arg(short, long, default_value = "0")]
        duration: u64,

        /// Use the synthetic demo pad instead of panel hardware
        #[arg(long)]
        demo: bool,
    },

    /// Show the force heatmap without driving the plotter
    Monitor {
        /// Session duration in seconds (0 = until stopped)
        #[arg(short, long, default_value = "0")]
        duration: u64,

        /// Use the synthetic demo pad instead of panel hardware
        #[arg(long)]
        demo: bool,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "motion.max_step", "mapping.scale_x")
        key: String,

        /// Value to set
        value: String,
    },

    /// Get a specific configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
