//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// ReviewDeck - terminal client for an AI code review service
///
/// Select source files, submit them as one batch for AI analysis, and
/// browse per-file reviews and the persisted history without leaving the
/// terminal.
///
/// Examples:
///   reviewdeck src/main.rs src/lib.rs
///   reviewdeck --server http://localhost:8000 src/
///   reviewdeck --batch --format json src/
///   reviewdeck --dry-run src/
///   reviewdeck --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Files or directories to preselect for review
    ///
    /// Directories are walked recursively. Anything that fails the intake
    /// filter is skipped silently.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Base URL of the review service
    #[arg(
        short,
        long,
        default_value = "http://localhost:8000",
        env = "REVIEWDECK_SERVER"
    )]
    pub server: String,

    /// Path to configuration file
    ///
    /// If not specified, looks for .reviewdeck.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// File extensions to accept (comma-separated)
    ///
    /// Example: --extensions rs,py,js
    #[arg(long, value_name = "EXTS", value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Submit the given paths once, print the report, and exit
    #[arg(long)]
    pub batch: bool,

    /// Report format for --batch output (text, json)
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: ReportFormat,

    /// Run intake only: show which files would be submitted and exit
    #[arg(long, conflicts_with = "batch")]
    pub dry_run: bool,

    /// Generate a default .reviewdeck.toml configuration file
    #[arg(long)]
    pub init_config: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output, no spinner)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Output format for --batch reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    /// Plain text (default)
    #[default]
    Text,
    /// JSON
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Validate service URL format
        if !self.server.starts_with("http://") && !self.server.starts_with("https://") {
            return Err("Server URL must start with 'http://' or 'https://'".to_string());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Validate timeout if provided
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        // One-shot modes need something to work on
        if self.batch && self.paths.is_empty() {
            return Err("--batch requires at least one file or directory".to_string());
        }
        if self.dry_run && self.paths.is_empty() {
            return Err("--dry-run requires at least one file or directory".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
