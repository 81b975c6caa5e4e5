use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long)] // default location handled by Config::load_or_default
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Run a single refresh cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Refresh interval in seconds
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Token address to track
    #[arg(short, long)]
    pub token: Option<String>,
}
