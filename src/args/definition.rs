//! Command-line argument definition.

use std::path::PathBuf;

use clap::Parser;

/// locale-injector - merge plugin locale files into a live message store
#[derive(Parser, Debug)]
#[command(name = "locale-injector")]
#[command(version)]
#[command(about = "Merge per-plugin Locale/ files into a shared message store", long_about = None)]
pub struct Args {
    /// Directory whose sub-directories are plugins (each may contain a Locale/ folder)
    #[arg(short, long)]
    pub plugins: PathBuf,

    /// Target locale to inject (default: system locale, then the configured default)
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Settings file (default: ~/.config/locale-injector/locale-injector.yml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the merged message store as JSON to stdout
    #[arg(long)]
    pub print: bool,
}
