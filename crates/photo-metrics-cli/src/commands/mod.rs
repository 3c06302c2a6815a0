//! CLI command definitions and handlers.

pub mod analyze;

use clap::{Parser, Subcommand};

/// Photo Metrics - Technical image analysis
#[derive(Parser)]
#[command(name = "photo-metrics")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared analyze arguments (paths, thresholds, flags).
    #[command(flatten)]
    pub analyze: analyze::AnalyzeArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze images and emit technical reports
    Analyze(analyze::AnalyzeArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// All images were analyzed.
    Success,
    /// No images matched the given paths.
    NoImages,
    /// A fatal error occurred.
    Error,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        match code {
            ExitCode::Success => Self::from(0),
            ExitCode::Error => Self::from(1),
            ExitCode::NoImages => Self::from(2),
        }
    }
}
