//! Technical report types, the engine's sole output contract.

use serde::{Deserialize, Serialize};

/// Complete technical analysis of a single photograph.
///
/// Produced once per analysis call, immutable afterwards, and carries no
/// back-reference to the source pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalReport {
    /// Basic image metadata.
    pub basic_info: BasicInfo,
    /// Brightness, contrast and histogram statistics.
    pub exposure: ExposureReport,
    /// Sharpness and noise estimates.
    pub quality: QualityReport,
    /// Light direction, color temperature and shadow/highlight presence.
    pub lighting: LightingReport,
    /// Center of mass, rule-of-thirds grid, lines and symmetry.
    pub composition: CompositionReport,
    /// Channel balance, dominant colors and saturation.
    pub color: ColorReport,
}

/// Basic image metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Width divided by height, always positive.
    pub aspect_ratio: f64,
    /// Number of color channels (1 or 3).
    pub channels: u8,
    /// Total pixel count (`width * height`).
    pub total_pixels: u64,
}

/// Exposure statistics computed from the luminance histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExposureReport {
    /// Arithmetic mean of pixel intensities (0-255).
    pub mean_brightness: f64,
    /// Standard deviation of pixel intensities, used as the contrast metric (0-255).
    pub contrast: f64,
    /// Difference between the brightest and darkest observed intensities.
    pub dynamic_range: f64,
    /// Fraction of pixels in the shadow band (intensity 0-84), percent.
    pub shadows_percentage: f64,
    /// Fraction of pixels in the midtone band (intensity 85-169), percent.
    pub midtones_percentage: f64,
    /// Fraction of pixels in the highlight band (intensity 170-255), percent.
    pub highlights_percentage: f64,
    /// Intensity bin with the highest pixel count.
    pub peak_brightness: u8,
    /// Darkest observed intensity.
    pub min_value: u8,
    /// Brightest observed intensity.
    pub max_value: u8,
    /// Whether mean brightness falls below the configured dark threshold.
    pub is_underexposed: bool,
    /// Whether mean brightness exceeds the configured bright threshold with a
    /// substantial highlight band.
    pub is_overexposed: bool,
}

/// Sharpness and noise estimates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// Variance of the Laplacian response. Higher means sharper.
    pub sharpness_score: f64,
    /// Qualitative sharpness level mapped from the score via configurable
    /// cut points.
    pub sharpness_level: SharpnessLevel,
    /// Fraction of pixels with gradient magnitude above the edge threshold
    /// (0.0-1.0).
    pub edge_density: f64,
    /// Standard deviation of local intensity residuals in flat regions.
    pub noise_level: f64,
}

/// Qualitative sharpness classification.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SharpnessLevel {
    /// No meaningful edge energy at all.
    VeryBlurry,
    /// Soft image, likely missed focus or camera shake.
    Blurry,
    /// Usable but unremarkable sharpness.
    Acceptable,
    /// Well focused.
    Sharp,
    /// Crisp edges throughout.
    VerySharp,
}

/// Lighting conditions derived from regional brightness and channel balance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightingReport {
    /// Dominant light direction.
    pub light_direction: LightDirection,
    /// Warm/cool bias of the channel balance.
    pub color_temperature: ColorTemperature,
    /// Shadow-band area, percent of the image.
    pub shadow_percentage: f64,
    /// Whether the shadow area exceeds the configured fraction.
    pub has_strong_shadows: bool,
    /// Highlight-band area, percent of the image.
    pub highlight_percentage: f64,
    /// Whether the highlight area exceeds the configured clipping fraction.
    pub has_highlight_clipping: bool,
}

/// Estimated direction of the dominant light source.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightDirection {
    /// Brightest region at the top.
    Top,
    /// Brightest region at the bottom.
    Bottom,
    /// Brightest region on the left.
    Left,
    /// Brightest region on the right.
    Right,
    /// No region dominates, even or frontal lighting.
    Even,
}

/// Photographic warm/cool classification (not a Kelvin measurement).
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTemperature {
    /// Red channel dominates.
    Warm,
    /// Blue channel dominates.
    Cool,
    /// Neither channel dominates beyond the configured margin.
    Neutral,
}

/// Composition metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositionReport {
    /// Luminance-weighted centroid, always inside the image bounds.
    pub visual_center: Point,
    /// Geometric center of the frame.
    pub image_center: Point,
    /// Offset of the visual center from the geometric center.
    pub center_offset: Offset,
    /// Rule-of-thirds cell containing the visual center.
    pub primary_interest: GridCell,
    /// Whether the visual center lies within the configured distance of a
    /// thirds intersection.
    pub follows_rule_of_thirds: bool,
    /// Rule-of-thirds cell with the highest edge energy.
    pub most_active_region: GridCell,
    /// Mean gradient magnitude of the most active cell.
    pub most_active_energy: f64,
    /// Count of detected near-horizontal lines.
    pub horizontal_lines: usize,
    /// Count of detected near-vertical lines.
    pub vertical_lines: usize,
    /// Whether a near-horizontal line spans a large fraction of the width.
    pub has_horizon: bool,
    /// Horizontal-flip similarity, 0-100 where 100 is perfect symmetry.
    pub horizontal_symmetry: f64,
    /// Vertical-flip similarity, 0-100 where 100 is perfect symmetry.
    pub vertical_symmetry: f64,
    /// Whether either symmetry score reaches the configured tolerance.
    pub is_symmetric: bool,
}

/// Pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// Column, 0-based.
    pub x: u32,
    /// Row, 0-based.
    pub y: u32,
}

/// Signed pixel offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offset {
    /// Horizontal offset, positive towards the right.
    pub x: i64,
    /// Vertical offset, positive towards the bottom.
    pub y: i64,
}

/// Cell label for the rule-of-thirds 3x3 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridCell {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl GridCell {
    /// All cells in row-major scan order (top-left first).
    pub const SCAN_ORDER: [Self; 9] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::MiddleLeft,
        Self::MiddleCenter,
        Self::MiddleRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    /// Returns the cell containing the given pixel position.
    ///
    /// The frame is split at `width / 3` and `2 * width / 3` (and likewise
    /// for the height), so boundary pixels belong to the center band.
    #[must_use]
    pub fn from_position(x: u32, y: u32, width: u32, height: u32) -> Self {
        let third_x = width / 3;
        let third_y = height / 3;

        let col = if x < third_x {
            0
        } else if x > 2 * third_x {
            2
        } else {
            1
        };
        let row = if y < third_y {
            0
        } else if y > 2 * third_y {
            2
        } else {
            1
        };

        Self::SCAN_ORDER[row * 3 + col]
    }

    /// Snake-case label used in serialized reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TopLeft => "top_left",
            Self::TopCenter => "top_center",
            Self::TopRight => "top_right",
            Self::MiddleLeft => "middle_left",
            Self::MiddleCenter => "middle_center",
            Self::MiddleRight => "middle_right",
            Self::BottomLeft => "bottom_left",
            Self::BottomCenter => "bottom_center",
            Self::BottomRight => "bottom_right",
        }
    }
}

/// Channel balance and dominant color metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorReport {
    /// Mean red channel intensity (0-255).
    pub red_mean: f64,
    /// Mean green channel intensity (0-255).
    pub green_mean: f64,
    /// Mean blue channel intensity (0-255).
    pub blue_mean: f64,
    /// Red share of the total channel energy, percent.
    pub red_proportion: f64,
    /// Green share of the total channel energy, percent.
    pub green_proportion: f64,
    /// Blue share of the total channel energy, percent.
    pub blue_proportion: f64,
    /// Representative colors ordered by coverage, ties broken by scan order.
    pub dominant_colors: Vec<DominantColor>,
    /// Mean HSV saturation, 0-100.
    pub mean_saturation: f64,
}

/// One dominant color cluster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DominantColor {
    /// Centroid color of the cluster.
    pub rgb: [u8; 3],
    /// Fraction of pixels covered by the cluster (0.0-1.0).
    pub coverage: f64,
}

/// Analysis record emitted per image by batch front-ends.
///
/// Wraps the deterministic [`TechnicalReport`] with the source label and a
/// wall-clock timestamp; the report itself stays timestamp-free so identical
/// inputs serialize identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Source the image was loaded from (path or synthetic label).
    pub source: String,
    /// RFC 3339 timestamp of the analysis.
    pub timestamp: String,
    /// The technical report.
    pub report: TechnicalReport,
}
