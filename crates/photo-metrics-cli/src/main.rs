//! Photo Metrics CLI - Technical image analysis tool.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{Cli, Commands, ExitCode};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = match cli.command {
        Some(Commands::Analyze(ref args)) => run_analyze(args),
        None => {
            // Default behavior: run analyze with flattened args
            if cli.analyze.paths.is_empty() && !cli.analyze.base64 {
                eprintln!("error: No paths specified. Use --help for usage information.");
                return ExitCode::Error.into();
            }
            run_analyze(&cli.analyze)
        }
    };

    exit_code.into()
}

fn run_analyze(args: &commands::analyze::AnalyzeArgs) -> ExitCode {
    let config = config::AppConfig::load();
    let args = commands::analyze::AnalyzeArgs::with_config(args.clone(), &config);
    match commands::analyze::run(&args) {
        Ok(result) => result.exit_code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::Error
        }
    }
}
