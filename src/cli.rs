use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "skycast",
    version,
    about = "Current conditions and a 5-day forecast in your terminal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// City to open the TUI on, instead of the last search
    #[arg(long)]
    pub city: Option<String>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-run interactive setup
    Init,
    /// Validate config and test connections
    Check,
    /// Print current conditions
    Today {
        /// City to look up; remembered as the last search
        city: Option<String>,
    },
    /// Print the 5-day forecast
    Forecast {
        /// City to look up; remembered as the last search
        city: Option<String>,
    },
}

impl Cli {
    /// Default filter directive for the given verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}
