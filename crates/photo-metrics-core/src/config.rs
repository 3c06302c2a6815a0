//! Analyzer configuration with documented defaults.
//!
//! Every threshold is an explicit, validated parameter passed into the
//! analysis call; nothing is read from ambient state. Malformed values are
//! clamped by [`AnalysisConfig::sanitized`] rather than rejected, so a bad
//! configuration can degrade results but never crash an analyzer.

/// Full configuration for one analysis call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisConfig {
    /// Exposure classification thresholds.
    pub exposure: ExposureConfig,
    /// Sharpness and noise parameters.
    pub quality: QualityConfig,
    /// Light direction and temperature margins.
    pub lighting: LightingConfig,
    /// Grid, line and symmetry parameters.
    pub composition: CompositionConfig,
    /// Dominant color extraction parameters.
    pub color: ColorConfig,
}

impl AnalysisConfig {
    /// Returns a copy with every field clamped into its valid range.
    ///
    /// The engine calls this once per analysis, so callers may hand in raw
    /// user input without pre-validation.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self {
            exposure: self.exposure.sanitized(),
            quality: self.quality.sanitized(),
            lighting: self.lighting.sanitized(),
            composition: self.composition.sanitized(),
            color: self.color.sanitized(),
        }
    }
}

/// Exposure classification thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct ExposureConfig {
    /// Mean brightness below this is underexposed (0-255). Default 100.
    pub dark_threshold: f64,
    /// Mean brightness above this is a candidate for overexposure (0-255).
    /// Default 200.
    pub bright_threshold: f64,
    /// Highlight-band percentage that must accompany a bright mean before
    /// the image counts as overexposed (0-100). Default 20.
    pub overexposed_highlight_percentage: f64,
}

impl Default for ExposureConfig {
    fn default() -> Self {
        Self {
            dark_threshold: 100.0,
            bright_threshold: 200.0,
            overexposed_highlight_percentage: 20.0,
        }
    }
}

impl ExposureConfig {
    fn sanitized(&self) -> Self {
        Self {
            dark_threshold: clamp_or_default(self.dark_threshold, 0.0, 255.0, 100.0),
            bright_threshold: clamp_or_default(self.bright_threshold, 0.0, 255.0, 200.0),
            overexposed_highlight_percentage: clamp_or_default(
                self.overexposed_highlight_percentage,
                0.0,
                100.0,
                20.0,
            ),
        }
    }
}

/// Sharpness and noise parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityConfig {
    /// Ascending cut points mapping the Laplacian-variance score to the five
    /// sharpness levels. Default `[100, 300, 800, 1500]`.
    pub sharpness_cut_points: [f64; 4],
    /// Gradient magnitude above which a pixel counts as an edge.
    /// Default 100.
    pub edge_magnitude_threshold: f64,
    /// Gradient magnitude below which a pixel counts as flat for noise
    /// estimation. Default 40.
    pub flat_magnitude_threshold: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            sharpness_cut_points: [100.0, 300.0, 800.0, 1500.0],
            edge_magnitude_threshold: 100.0,
            flat_magnitude_threshold: 40.0,
        }
    }
}

impl QualityConfig {
    fn sanitized(&self) -> Self {
        let mut cuts = self.sharpness_cut_points.map(|c| c.max(0.0));
        cuts.sort_by(f64::total_cmp);
        Self {
            sharpness_cut_points: cuts,
            edge_magnitude_threshold: self.edge_magnitude_threshold.max(0.0),
            flat_magnitude_threshold: self.flat_magnitude_threshold.max(0.0),
        }
    }
}

/// Light direction and temperature margins.
#[derive(Debug, Clone, PartialEq)]
pub struct LightingConfig {
    /// Minimum brightness advantage (0-255) a region needs before it counts
    /// as the light source; ties resolve to even lighting. Default 5.
    pub direction_sensitivity: f64,
    /// Minimum red/blue mean difference (0-255) before the image counts as
    /// warm or cool. Default 20.
    pub temperature_margin: f64,
    /// Shadow-band percentage above which shadows count as strong (0-100).
    /// Default 15.
    pub strong_shadow_percentage: f64,
    /// Highlight-band percentage above which highlights count as clipping
    /// (0-100). Default 5.
    pub highlight_clip_percentage: f64,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            direction_sensitivity: 5.0,
            temperature_margin: 20.0,
            strong_shadow_percentage: 15.0,
            highlight_clip_percentage: 5.0,
        }
    }
}

impl LightingConfig {
    fn sanitized(&self) -> Self {
        Self {
            direction_sensitivity: clamp_or_default(self.direction_sensitivity, 0.0, 255.0, 5.0),
            temperature_margin: clamp_or_default(self.temperature_margin, 0.0, 255.0, 20.0),
            strong_shadow_percentage: clamp_or_default(
                self.strong_shadow_percentage,
                0.0,
                100.0,
                15.0,
            ),
            highlight_clip_percentage: clamp_or_default(
                self.highlight_clip_percentage,
                0.0,
                100.0,
                5.0,
            ),
        }
    }
}

/// Grid, line and symmetry parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionConfig {
    /// Pixel distance from the visual center to the nearest rule-of-thirds
    /// intersection within which the composition counts as following the
    /// rule of thirds. Default 50.
    pub thirds_tolerance: f64,
    /// Symmetry score (0-100) at or above which an axis counts as symmetric.
    /// Default 70.
    pub symmetry_tolerance: f64,
    /// Angular tolerance in degrees for bucketing edges as near-horizontal
    /// or near-vertical. Default 10.
    pub angle_tolerance_degrees: f64,
    /// Fraction of the row/column that must be edge pixels before it counts
    /// as a line (0.0-1.0). Default 0.5.
    pub min_line_span: f64,
    /// Width fraction a near-horizontal line must span to count as a horizon
    /// candidate (0.0-1.0). Default 0.6.
    pub horizon_span: f64,
    /// Gradient magnitude above which a pixel counts as an edge. Default 100.
    pub edge_magnitude_threshold: f64,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            thirds_tolerance: 50.0,
            symmetry_tolerance: 70.0,
            angle_tolerance_degrees: 10.0,
            min_line_span: 0.5,
            horizon_span: 0.6,
            edge_magnitude_threshold: 100.0,
        }
    }
}

impl CompositionConfig {
    fn sanitized(&self) -> Self {
        Self {
            thirds_tolerance: clamp_or_default(self.thirds_tolerance, 0.0, 10_000.0, 50.0),
            symmetry_tolerance: clamp_or_default(self.symmetry_tolerance, 0.0, 100.0, 70.0),
            angle_tolerance_degrees: clamp_or_default(
                self.angle_tolerance_degrees,
                0.0,
                45.0,
                10.0,
            ),
            min_line_span: clamp_or_default(self.min_line_span, 0.0, 1.0, 0.5),
            horizon_span: clamp_or_default(self.horizon_span, 0.0, 1.0, 0.6),
            edge_magnitude_threshold: self.edge_magnitude_threshold.max(0.0),
        }
    }
}

/// Dominant color extraction parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorConfig {
    /// Maximum number of dominant colors to report. Default 4.
    pub dominant_color_count: usize,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            dominant_color_count: 4,
        }
    }
}

impl ColorConfig {
    fn sanitized(&self) -> Self {
        Self {
            dominant_color_count: self.dominant_color_count.clamp(1, 16),
        }
    }
}

/// Clamps `value` to `[min, max]`, substituting `default` for NaN.
fn clamp_or_default(value: f64, min: f64, max: f64, default: f64) -> f64 {
    if value.is_nan() {
        default
    } else {
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert!((config.exposure.dark_threshold - 100.0).abs() < f64::EPSILON);
        assert!((config.exposure.bright_threshold - 200.0).abs() < f64::EPSILON);
        assert_eq!(config.quality.sharpness_cut_points, [100.0, 300.0, 800.0, 1500.0]);
        assert!((config.composition.symmetry_tolerance - 70.0).abs() < f64::EPSILON);
        assert!((config.composition.thirds_tolerance - 50.0).abs() < f64::EPSILON);
        assert_eq!(config.color.dominant_color_count, 4);
    }

    #[test]
    fn test_sanitized_clamps_negative_tolerances() {
        let config = AnalysisConfig {
            composition: CompositionConfig {
                thirds_tolerance: -5.0,
                symmetry_tolerance: -30.0,
                angle_tolerance_degrees: -1.0,
                min_line_span: 7.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let clean = config.sanitized();
        assert!((clean.composition.thirds_tolerance - 0.0).abs() < f64::EPSILON);
        assert!((clean.composition.symmetry_tolerance - 0.0).abs() < f64::EPSILON);
        assert!((clean.composition.angle_tolerance_degrees - 0.0).abs() < f64::EPSILON);
        assert!((clean.composition.min_line_span - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sanitized_sorts_cut_points() {
        let config = QualityConfig {
            sharpness_cut_points: [1500.0, 100.0, 800.0, 300.0],
            ..Default::default()
        };
        assert_eq!(
            config.sanitized().sharpness_cut_points,
            [100.0, 300.0, 800.0, 1500.0]
        );
    }

    #[test]
    fn test_sanitized_replaces_nan_with_default() {
        let config = ExposureConfig {
            dark_threshold: f64::NAN,
            ..Default::default()
        };
        assert!((config.sanitized().dark_threshold - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sanitized_bounds_color_count() {
        let config = ColorConfig {
            dominant_color_count: 0,
        };
        assert_eq!(config.sanitized().dominant_color_count, 1);

        let config = ColorConfig {
            dominant_color_count: 500,
        };
        assert_eq!(config.sanitized().dominant_color_count, 16);
    }
}
