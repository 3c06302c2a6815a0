//! Configuration file support for photo-metrics.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/photo-metrics/config.toml` (lowest priority)
//! - Project-local: `.photo-metrics.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Exposure analysis settings.
    pub exposure: ExposureConfig,
    /// Sharpness and noise settings.
    pub quality: QualityConfig,
    /// Lighting analysis settings.
    pub lighting: LightingConfig,
    /// Composition analysis settings.
    pub composition: CompositionConfig,
    /// Color analysis settings.
    pub color: ColorConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Exposure analysis configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ExposureConfig {
    /// Mean brightness below which an image is underexposed (0-255).
    pub dark_threshold: Option<f64>,
    /// Mean brightness above which an image may be overexposed (0-255).
    pub bright_threshold: Option<f64>,
    /// Highlight-band percentage required for overexposure (0-100).
    pub overexposed_highlight_percentage: Option<f64>,
}

/// Sharpness and noise configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Laplacian-variance cut points between sharpness levels, ascending.
    pub sharpness_cut_points: Option<[f64; 4]>,
    /// Gradient magnitude above which a pixel counts as an edge.
    pub edge_magnitude_threshold: Option<f64>,
    /// Gradient magnitude below which a pixel counts as flat.
    pub flat_magnitude_threshold: Option<f64>,
}

/// Lighting analysis configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Brightness difference required to call a light direction.
    pub direction_sensitivity: Option<f64>,
    /// Red/blue difference required for a warm or cool call.
    pub temperature_margin: Option<f64>,
    /// Shadow-band percentage above which shadows count as strong (0-100).
    pub strong_shadow_percentage: Option<f64>,
    /// Highlight-band percentage above which clipping is flagged (0-100).
    pub highlight_clip_percentage: Option<f64>,
}

/// Composition analysis configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CompositionConfig {
    /// Pixel distance to a thirds intersection within which the visual
    /// center counts as following the rule of thirds.
    pub thirds_tolerance: Option<f64>,
    /// Symmetry score at or above which an axis counts as symmetric (0-100).
    pub symmetry_tolerance: Option<f64>,
    /// Angular tolerance for line orientation, degrees.
    pub angle_tolerance_degrees: Option<f64>,
    /// Fraction of a row/column that must be edge pixels (0.0-1.0).
    pub min_line_span: Option<f64>,
    /// Width fraction a horizon candidate must span (0.0-1.0).
    pub horizon_span: Option<f64>,
    /// Gradient magnitude above which a pixel counts as an edge.
    pub edge_magnitude_threshold: Option<f64>,
}

/// Color analysis configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Number of dominant colors to report (1-16).
    pub dominant_color_count: Option<usize>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/photo-metrics/config.toml`
    /// 2. Project-local: `.photo-metrics.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        // Load XDG config (lowest priority)
        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        // Load project-local config (higher priority, merged)
        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        // Validate merged config
        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        // Brightness thresholds (0-255 range)
        for (name, value) in [
            ("exposure.dark_threshold", self.exposure.dark_threshold),
            ("exposure.bright_threshold", self.exposure.bright_threshold),
        ] {
            if let Some(t) = value {
                if !(0.0..=255.0).contains(&t) {
                    return Err(format!("{name} must be 0-255, got {t}"));
                }
            }
        }

        // Percentage values (0-100 range)
        for (name, value) in [
            (
                "exposure.overexposed_highlight_percentage",
                self.exposure.overexposed_highlight_percentage,
            ),
            (
                "lighting.strong_shadow_percentage",
                self.lighting.strong_shadow_percentage,
            ),
            (
                "lighting.highlight_clip_percentage",
                self.lighting.highlight_clip_percentage,
            ),
            (
                "composition.symmetry_tolerance",
                self.composition.symmetry_tolerance,
            ),
        ] {
            if let Some(t) = value {
                if !(0.0..=100.0).contains(&t) {
                    return Err(format!("{name} must be 0-100, got {t}"));
                }
            }
        }

        // Fractional values (0.0-1.0 range)
        for (name, value) in [
            ("composition.min_line_span", self.composition.min_line_span),
            ("composition.horizon_span", self.composition.horizon_span),
        ] {
            if let Some(t) = value {
                if !(0.0..=1.0).contains(&t) {
                    return Err(format!("{name} must be 0.0-1.0, got {t}"));
                }
            }
        }

        // Pixel distances must be non-negative
        if let Some(t) = self.composition.thirds_tolerance {
            if t < 0.0 {
                return Err(format!(
                    "composition.thirds_tolerance must be non-negative, got {t}"
                ));
            }
        }

        // Cut points must ascend
        if let Some(points) = self.quality.sharpness_cut_points {
            if points.windows(2).any(|w| w[0] > w[1]) {
                return Err(format!(
                    "quality.sharpness_cut_points must be ascending, got {points:?}"
                ));
            }
        }

        // Dominant color count
        if let Some(n) = self.color.dominant_color_count {
            if !(1..=16).contains(&n) {
                return Err(format!("color.dominant_color_count must be 1-16, got {n}"));
            }
        }

        // Output format validation
        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(format!("output.format must be 'json' or 'jsonl', got '{f}'"));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // General
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        // Exposure
        self.exposure.dark_threshold = other
            .exposure
            .dark_threshold
            .or(self.exposure.dark_threshold);
        self.exposure.bright_threshold = other
            .exposure
            .bright_threshold
            .or(self.exposure.bright_threshold);
        self.exposure.overexposed_highlight_percentage = other
            .exposure
            .overexposed_highlight_percentage
            .or(self.exposure.overexposed_highlight_percentage);

        // Quality
        self.quality.sharpness_cut_points = other
            .quality
            .sharpness_cut_points
            .or(self.quality.sharpness_cut_points);
        self.quality.edge_magnitude_threshold = other
            .quality
            .edge_magnitude_threshold
            .or(self.quality.edge_magnitude_threshold);
        self.quality.flat_magnitude_threshold = other
            .quality
            .flat_magnitude_threshold
            .or(self.quality.flat_magnitude_threshold);

        // Lighting
        self.lighting.direction_sensitivity = other
            .lighting
            .direction_sensitivity
            .or(self.lighting.direction_sensitivity);
        self.lighting.temperature_margin = other
            .lighting
            .temperature_margin
            .or(self.lighting.temperature_margin);
        self.lighting.strong_shadow_percentage = other
            .lighting
            .strong_shadow_percentage
            .or(self.lighting.strong_shadow_percentage);
        self.lighting.highlight_clip_percentage = other
            .lighting
            .highlight_clip_percentage
            .or(self.lighting.highlight_clip_percentage);

        // Composition
        self.composition.thirds_tolerance = other
            .composition
            .thirds_tolerance
            .or(self.composition.thirds_tolerance);
        self.composition.symmetry_tolerance = other
            .composition
            .symmetry_tolerance
            .or(self.composition.symmetry_tolerance);
        self.composition.angle_tolerance_degrees = other
            .composition
            .angle_tolerance_degrees
            .or(self.composition.angle_tolerance_degrees);
        self.composition.min_line_span = other
            .composition
            .min_line_span
            .or(self.composition.min_line_span);
        self.composition.horizon_span = other
            .composition
            .horizon_span
            .or(self.composition.horizon_span);
        self.composition.edge_magnitude_threshold = other
            .composition
            .edge_magnitude_threshold
            .or(self.composition.edge_magnitude_threshold);

        // Color
        self.color.dominant_color_count = other
            .color
            .dominant_color_count
            .or(self.color.dominant_color_count);

        // Output
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("photo-metrics").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.photo-metrics.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".photo-metrics.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.exposure.dark_threshold.is_none());
        assert!(config.quality.sharpness_cut_points.is_none());
        assert!(config.composition.symmetry_tolerance.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: AppConfig = toml::from_str("").expect("parse empty config");
        assert!(config.exposure.dark_threshold.is_none());
    }

    #[test]
    fn test_parse_exposure_section() {
        let toml = r"
[exposure]
dark_threshold = 90.0
bright_threshold = 210.0
";
        let config: AppConfig = toml::from_str(toml).expect("parse exposure config");
        assert_eq!(config.exposure.dark_threshold, Some(90.0));
        assert_eq!(config.exposure.bright_threshold, Some(210.0));
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r"
[general]
recursive = true

[exposure]
dark_threshold = 95.0
bright_threshold = 205.0
overexposed_highlight_percentage = 25.0

[quality]
sharpness_cut_points = [100.0, 300.0, 800.0, 1500.0]
edge_magnitude_threshold = 110.0
flat_magnitude_threshold = 35.0

[lighting]
direction_sensitivity = 8.0
temperature_margin = 25.0

[composition]
thirds_tolerance = 40.0
symmetry_tolerance = 75.0
min_line_span = 0.4

[color]
dominant_color_count = 6

[output]
format = 'json'
pretty = true
progress = false
";
        let config: AppConfig = toml::from_str(toml).expect("parse full config");

        assert_eq!(config.general.recursive, Some(true));
        assert_eq!(config.exposure.dark_threshold, Some(95.0));
        assert_eq!(
            config.quality.sharpness_cut_points,
            Some([100.0, 300.0, 800.0, 1500.0])
        );
        assert_eq!(config.lighting.direction_sensitivity, Some(8.0));
        assert_eq!(config.composition.thirds_tolerance, Some(40.0));
        assert_eq!(config.composition.symmetry_tolerance, Some(75.0));
        assert_eq!(config.color.dominant_color_count, Some(6));
        assert_eq!(config.output.format, Some("json".to_string()));
        assert_eq!(config.output.pretty, Some(true));
    }

    #[test]
    fn test_merge_configs() {
        let mut base: AppConfig = toml::from_str(
            r"
[exposure]
dark_threshold = 90.0

[quality]
edge_magnitude_threshold = 120.0
",
        )
        .expect("parse base");

        let override_config: AppConfig = toml::from_str(
            r"
[exposure]
dark_threshold = 110.0

[color]
dominant_color_count = 8
",
        )
        .expect("parse override");

        base.merge(override_config);

        // Dark threshold overridden
        assert_eq!(base.exposure.dark_threshold, Some(110.0));
        // Quality preserved from base
        assert_eq!(base.quality.edge_magnitude_threshold, Some(120.0));
        // Color added from override
        assert_eq!(base.color.dominant_color_count, Some(8));
    }

    #[test]
    fn test_merge_preserves_base_when_override_is_none() {
        let mut base: AppConfig = toml::from_str(
            r"
[exposure]
dark_threshold = 90.0
bright_threshold = 210.0
",
        )
        .expect("parse base");

        let override_config: AppConfig = toml::from_str(
            r"
[exposure]
dark_threshold = 100.0
",
        )
        .expect("parse override");

        base.merge(override_config);

        assert_eq!(base.exposure.dark_threshold, Some(100.0));
        assert_eq!(base.exposure.bright_threshold, Some(210.0));
    }

    #[test]
    fn test_merge_empty_override_preserves_base() {
        let mut base: AppConfig = toml::from_str(
            r"
[composition]
symmetry_tolerance = 80.0
",
        )
        .expect("parse base");

        base.merge(AppConfig::default());

        assert_eq!(base.composition.symmetry_tolerance, Some(80.0));
    }

    #[test]
    fn test_partial_sections() {
        let toml = r"
[lighting]
temperature_margin = 15.0

[output]
format = 'jsonl'
";
        let config: AppConfig = toml::from_str(toml).expect("parse mixed");

        assert_eq!(config.lighting.temperature_margin, Some(15.0));
        assert!(config.lighting.direction_sensitivity.is_none());
        assert_eq!(config.output.format, Some("jsonl".to_string()));
        assert!(config.exposure.dark_threshold.is_none());
    }

    #[test]
    fn test_invalid_toml_syntax_handled() {
        let toml = r"
[exposure
dark_threshold = 90.0
"; // Missing closing bracket
        let result: Result<AppConfig, _> = toml::from_str(toml);
        assert!(result.is_err(), "invalid TOML should return error");
    }

    #[test]
    fn test_invalid_field_type_handled() {
        let toml = r#"
[exposure]
dark_threshold = "not a number"
"#;
        let result: Result<AppConfig, _> = toml::from_str(toml);
        assert!(result.is_err(), "type mismatch should return error");
    }

    #[test]
    fn test_validate_brightness_threshold_out_of_range() {
        let mut config = AppConfig::default();
        config.exposure.dark_threshold = Some(300.0);

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("exposure.dark_threshold"));
    }

    #[test]
    fn test_validate_percentage_out_of_range() {
        let mut config = AppConfig::default();
        config.composition.symmetry_tolerance = Some(150.0);

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("composition.symmetry_tolerance"));
    }

    #[test]
    fn test_validate_negative_thirds_tolerance() {
        let mut config = AppConfig::default();
        config.composition.thirds_tolerance = Some(-10.0);

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("composition.thirds_tolerance"));
    }

    #[test]
    fn test_validate_fraction_out_of_range() {
        let mut config = AppConfig::default();
        config.composition.min_line_span = Some(1.5);

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("composition.min_line_span"));
    }

    #[test]
    fn test_validate_descending_cut_points() {
        let mut config = AppConfig::default();
        config.quality.sharpness_cut_points = Some([800.0, 300.0, 100.0, 1500.0]);

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("sharpness_cut_points"));
    }

    #[test]
    fn test_validate_dominant_color_count() {
        let mut config = AppConfig::default();
        config.color.dominant_color_count = Some(0);

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("dominant_color_count"));
    }

    #[test]
    fn test_validate_output_format_invalid() {
        let mut config = AppConfig::default();
        config.output.format = Some("xml".to_string());

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("output.format"));
    }

    #[test]
    fn test_validate_empty_config_passes() {
        assert!(AppConfig::default().validate().is_ok());
    }
}
