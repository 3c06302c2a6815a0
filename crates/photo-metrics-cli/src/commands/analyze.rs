//! Analyze command - produce technical reports for images.

use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use photo_metrics_adapters::{load_base64, FsImageSource};
use photo_metrics_core::{
    analyze_image, AnalysisConfig, AnalysisRecord, ImageSource, ProgressEvent, ProgressSink,
    ResultOutput,
};
use tracing::{debug, info};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressBar};

/// Output format for records.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

/// Parse and validate a brightness threshold (0-255).
fn parse_brightness(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=255.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=255.0"))
    }
}

/// Parse and validate a percentage (0-100).
fn parse_percentage(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=100.0"))
    }
}

/// Parse and validate a dominant color count (1-16).
fn parse_color_count(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid count"))?;
    if (1..=16).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 1..=16"))
    }
}

/// Shared arguments for image analysis.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct AnalyzeArgs {
    /// Files or directories to analyze
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Read a single base64-encoded image from stdin instead of paths
    #[arg(long, conflicts_with = "paths")]
    pub base64: bool,

    /// Mean brightness below which an image is underexposed (0-255)
    #[arg(long, value_parser = parse_brightness)]
    pub dark_threshold: Option<f64>,

    /// Mean brightness above which an image may be overexposed (0-255)
    #[arg(long, value_parser = parse_brightness)]
    pub bright_threshold: Option<f64>,

    /// Symmetry score at which an axis counts as symmetric (0-100)
    #[arg(long, value_parser = parse_percentage)]
    pub symmetry_tolerance: Option<f64>,

    /// Number of dominant colors to report (1-16)
    #[arg(long, value_parser = parse_color_count)]
    pub dominant_colors: Option<usize>,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Merged config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    config: Option<AppConfig>,
}

impl AnalyzeArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Engine defaults
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    #[must_use]
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        // Recursive: config applies only if CLI --recursive not passed
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        // Thresholds: CLI > config (analysis_config falls back to defaults)
        args.dark_threshold = args.dark_threshold.or(config.exposure.dark_threshold);
        args.bright_threshold = args.bright_threshold.or(config.exposure.bright_threshold);
        args.symmetry_tolerance = args
            .symmetry_tolerance
            .or(config.composition.symmetry_tolerance);
        args.dominant_colors = args.dominant_colors.or(config.color.dominant_color_count);

        // Output format: CLI > config
        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }

        // Boolean output options: CLI flag wins, then config
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        // Store config for analysis_config to access per-analyzer settings
        args.config = Some(config.clone());

        args
    }

    /// Build the engine configuration from merged args.
    ///
    /// Starts from the engine defaults, applies config-file values, then the
    /// CLI threshold flags on top.
    fn analysis_config(&self) -> AnalysisConfig {
        let mut analysis = AnalysisConfig::default();
        let config = self.config.as_ref();

        if let Some(config) = config {
            if let Some(v) = config.exposure.overexposed_highlight_percentage {
                analysis.exposure.overexposed_highlight_percentage = v;
            }
            if let Some(v) = config.quality.sharpness_cut_points {
                analysis.quality.sharpness_cut_points = v;
            }
            if let Some(v) = config.quality.edge_magnitude_threshold {
                analysis.quality.edge_magnitude_threshold = v;
            }
            if let Some(v) = config.quality.flat_magnitude_threshold {
                analysis.quality.flat_magnitude_threshold = v;
            }
            if let Some(v) = config.lighting.direction_sensitivity {
                analysis.lighting.direction_sensitivity = v;
            }
            if let Some(v) = config.lighting.temperature_margin {
                analysis.lighting.temperature_margin = v;
            }
            if let Some(v) = config.lighting.strong_shadow_percentage {
                analysis.lighting.strong_shadow_percentage = v;
            }
            if let Some(v) = config.lighting.highlight_clip_percentage {
                analysis.lighting.highlight_clip_percentage = v;
            }
            if let Some(v) = config.composition.thirds_tolerance {
                analysis.composition.thirds_tolerance = v;
            }
            if let Some(v) = config.composition.angle_tolerance_degrees {
                analysis.composition.angle_tolerance_degrees = v;
            }
            if let Some(v) = config.composition.min_line_span {
                analysis.composition.min_line_span = v;
            }
            if let Some(v) = config.composition.horizon_span {
                analysis.composition.horizon_span = v;
            }
            if let Some(v) = config.composition.edge_magnitude_threshold {
                analysis.composition.edge_magnitude_threshold = v;
            }
        }

        // CLI flags win over everything (with_config already folded config
        // values into these when the flag was absent).
        if let Some(v) = self.dark_threshold {
            analysis.exposure.dark_threshold = v;
        }
        if let Some(v) = self.bright_threshold {
            analysis.exposure.bright_threshold = v;
        }
        if let Some(v) = self.symmetry_tolerance {
            analysis.composition.symmetry_tolerance = v;
        }
        if let Some(v) = self.dominant_colors {
            analysis.color.dominant_color_count = v;
        }

        analysis
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Jsonl)
    }

    /// Build the stdout output for the requested format.
    fn output(&self) -> JsonOutput {
        match self.format() {
            OutputFormat::Jsonl => JsonOutput::lines_to_stdout(),
            OutputFormat::Json => JsonOutput::array_to_stdout(self.pretty),
        }
    }
}

/// Result of running the analyze command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct AnalyzeResult {
    /// Number of images analyzed.
    pub processed: usize,
    /// Number of images skipped.
    pub skipped: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the analyze command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &AnalyzeArgs) -> Result<AnalyzeResult> {
    if args.base64 {
        return run_base64(args);
    }

    info!("Running analyze command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let source = FsImageSource::new(args.paths.clone(), args.recursive);
    let total = source.count_hint();

    // Determine if we should show progress
    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);

    let output = args.output();

    process_images(&source, &output, &progress_bar, args)
}

/// Analyze a single base64 payload read from stdin.
fn run_base64(args: &AnalyzeArgs) -> Result<AnalyzeResult> {
    info!("Reading base64 payload from stdin");

    let mut payload = String::new();
    std::io::stdin()
        .read_to_string(&mut payload)
        .context("failed to read stdin")?;

    let info = load_base64("stdin", &payload)?;
    let record = analyze_one(&info, &args.analysis_config())?;

    let output = args.output();
    output.write(&record)?;
    output.flush()?;

    Ok(AnalyzeResult {
        processed: 1,
        skipped: 0,
        exit_code: ExitCode::Success,
    })
}

/// Process images through the analysis engine.
fn process_images(
    source: &FsImageSource,
    output: &JsonOutput,
    progress: &ProgressBar,
    args: &AnalyzeArgs,
) -> Result<AnalyzeResult> {
    let total = source.count_hint();
    let analysis_config = args.analysis_config();
    let mut processed = 0usize;
    let mut skipped = 0usize;

    for (index, image_result) in source.images().enumerate() {
        let image = match image_result {
            Ok(img) => img,
            Err(e) => {
                // Note: error message contains the path via anyhow context
                progress.on_event(ProgressEvent::Skipped {
                    source: format!("image {index}"),
                    reason: e.to_string(),
                });
                skipped += 1;
                continue;
            }
        };

        progress.on_event(ProgressEvent::Started {
            source: image.source.clone(),
            index,
            total,
        });

        let record = match analyze_one(&image, &analysis_config) {
            Ok(record) => record,
            Err(e) => {
                progress.on_event(ProgressEvent::Skipped {
                    source: image.source.clone(),
                    reason: e.to_string(),
                });
                skipped += 1;
                continue;
            }
        };

        progress.on_event(ProgressEvent::Completed {
            record: record.clone(),
        });

        output.write(&record)?;
        processed += 1;
    }

    output.flush()?;

    progress.on_event(ProgressEvent::Finished { processed, skipped });

    let exit_code = if processed == 0 && skipped == 0 {
        ExitCode::NoImages
    } else {
        ExitCode::Success
    };

    Ok(AnalyzeResult {
        processed,
        skipped,
        exit_code,
    })
}

/// Analyze one image and wrap the report in a timestamped record.
fn analyze_one(
    image: &photo_metrics_core::ImageInfo,
    config: &AnalysisConfig,
) -> Result<AnalysisRecord> {
    debug!("Analyzing {}", image.source);
    let report = analyze_image(image, config)?;
    Ok(AnalysisRecord {
        source: image.source.clone(),
        timestamp: iso_timestamp(),
        report,
    })
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
