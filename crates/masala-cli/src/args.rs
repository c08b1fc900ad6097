//! Command-line argument definitions for the Masala CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the notification to process, the view
//! to print, the configuration file and logging verbosity.

use clap::Parser;

use masala::config::ViewKind;

/// Command-line arguments for the Masala processor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a document-change notification (JSON)
    #[arg(help = "Path to the input notification")]
    pub input: String,

    /// Write the view here instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// View to print (tree, graph); defaults to the configured view
    #[arg(long)]
    pub view: Option<ViewKind>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
