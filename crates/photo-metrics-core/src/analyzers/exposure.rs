//! Exposure analysis.
//!
//! All exposure statistics derive from a single 256-bin luminance histogram:
//! mean brightness, contrast (standard deviation), dynamic range, fixed
//! shadow/midtone/highlight bands and the under/over classification.

use image::GrayImage;

use crate::config::ExposureConfig;
use crate::domain::ExposureReport;

/// First intensity above the shadow band.
const MIDTONE_START: usize = 85;
/// First intensity of the highlight band.
const HIGHLIGHT_START: usize = 170;

/// 256-bin histogram of luminance values.
#[derive(Debug, Clone)]
pub struct Histogram {
    bins: [u64; 256],
    total: u64,
}

impl Histogram {
    /// Counts every pixel of a grayscale image into its intensity bin.
    #[must_use]
    pub fn from_luma(image: &GrayImage) -> Self {
        let mut bins = [0u64; 256];
        for pixel in image.pixels() {
            bins[usize::from(pixel.0[0])] += 1;
        }
        let total = bins.iter().sum();
        Self { bins, total }
    }

    /// Total pixel count; equals `width * height` of the source image.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Pixel count of a single intensity bin.
    #[must_use]
    pub fn count(&self, intensity: u8) -> u64 {
        self.bins[usize::from(intensity)]
    }

    /// Number of bins with at least one pixel.
    #[must_use]
    pub fn populated_bins(&self) -> usize {
        self.bins.iter().filter(|&&c| c > 0).count()
    }

    /// Mean luminance.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let sum: u64 = self
            .bins
            .iter()
            .enumerate()
            .map(|(i, &count)| (i as u64) * count)
            .sum();
        sum as f64 / self.total as f64
    }

    /// Standard deviation of luminance.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let mean = self.mean();
        let variance: f64 = self
            .bins
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let diff = (i as f64) - mean;
                diff * diff * (count as f64)
            })
            .sum::<f64>()
            / (self.total as f64);
        variance.sqrt()
    }

    /// Intensity of the bin with the highest count (first on ties).
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn peak(&self) -> u8 {
        let mut best = 0usize;
        for (i, &count) in self.bins.iter().enumerate() {
            if count > self.bins[best] {
                best = i;
            }
        }
        best as u8
    }

    /// Darkest populated intensity, or 0 for an empty histogram.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn min_value(&self) -> u8 {
        self.bins
            .iter()
            .position(|&c| c > 0)
            .unwrap_or(0) as u8
    }

    /// Brightest populated intensity, or 0 for an empty histogram.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn max_value(&self) -> u8 {
        self.bins
            .iter()
            .rposition(|&c| c > 0)
            .unwrap_or(0) as u8
    }

    /// Percentage of pixels with intensity in `[start, end)`.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn band_percentage(&self, start: usize, end: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let count: u64 = self.bins[start.min(256)..end.min(256)].iter().sum();
        count as f64 / self.total as f64 * 100.0
    }
}

/// Shadow and highlight band percentages handed to the lighting analyzer.
///
/// Computed once here and passed by value; never recomputed downstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposureBands {
    /// Shadow-band area, percent of the image.
    pub shadow_percentage: f64,
    /// Highlight-band area, percent of the image.
    pub highlight_percentage: f64,
}

/// Exposure analyzer output: the report section plus the band handoff.
#[derive(Debug, Clone)]
pub struct ExposureOutcome {
    /// Report section.
    pub report: ExposureReport,
    /// Band percentages consumed by the lighting analyzer.
    pub bands: ExposureBands,
}

/// Analyzes exposure from the shared grayscale buffer.
///
/// Deterministic, and total: a fully uniform image yields contrast 0 and
/// dynamic range 0 rather than an error.
#[must_use]
pub fn analyze(gray: &GrayImage, config: &ExposureConfig) -> ExposureOutcome {
    let histogram = Histogram::from_luma(gray);

    let mean_brightness = histogram.mean();
    let contrast = histogram.std_dev();
    let min_value = histogram.min_value();
    let max_value = histogram.max_value();
    let dynamic_range = f64::from(max_value) - f64::from(min_value);

    let shadows_percentage = histogram.band_percentage(0, MIDTONE_START);
    let midtones_percentage = histogram.band_percentage(MIDTONE_START, HIGHLIGHT_START);
    let highlights_percentage = histogram.band_percentage(HIGHLIGHT_START, 256);

    let is_underexposed = mean_brightness < config.dark_threshold;
    // A bright mean alone is not enough; a substantial highlight band must
    // accompany it so evenly bright scenes are not flagged.
    let is_overexposed = mean_brightness > config.bright_threshold
        && highlights_percentage > config.overexposed_highlight_percentage;

    ExposureOutcome {
        report: ExposureReport {
            mean_brightness,
            contrast,
            dynamic_range,
            shadows_percentage,
            midtones_percentage,
            highlights_percentage,
            peak_brightness: histogram.peak(),
            min_value,
            max_value,
            is_underexposed,
            is_overexposed,
        },
        bands: ExposureBands {
            shadow_percentage: shadows_percentage,
            highlight_percentage: highlights_percentage,
        },
    }
}

#[cfg(test)]
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
mod tests {
    use super::*;
    use image::Luma;

    fn uniform(width: u32, height: u32, value: u8) -> GrayImage {
        GrayImage::from_fn(width, height, |_, _| Luma([value]))
    }

    #[test]
    fn test_histogram_sums_to_pixel_count() {
        let img = GrayImage::from_fn(37, 53, |x, y| Luma([((x * 7 + y * 13) % 256) as u8]));
        let hist = Histogram::from_luma(&img);
        assert_eq!(hist.total(), 37 * 53);
    }

    #[test]
    fn test_histogram_uniform_statistics() {
        let hist = Histogram::from_luma(&uniform(100, 100, 128));
        assert_eq!(hist.mean(), 128.0);
        assert_eq!(hist.std_dev(), 0.0);
        assert_eq!(hist.min_value(), 128);
        assert_eq!(hist.max_value(), 128);
        assert_eq!(hist.peak(), 128);
        assert_eq!(hist.populated_bins(), 1);
    }

    #[test]
    fn test_histogram_empty() {
        let hist = Histogram::from_luma(&GrayImage::new(0, 0));
        assert_eq!(hist.total(), 0);
        assert_eq!(hist.mean(), 0.0);
        assert_eq!(hist.std_dev(), 0.0);
        assert_eq!(hist.band_percentage(0, 256), 0.0);
    }

    #[test]
    fn test_histogram_peak_prefers_first_on_tie() {
        let mut img = GrayImage::new(2, 1);
        img.put_pixel(0, 0, Luma([10]));
        img.put_pixel(1, 0, Luma([200]));
        let hist = Histogram::from_luma(&img);
        assert_eq!(hist.peak(), 10);
    }

    #[test]
    fn test_uniform_gray_report() {
        let outcome = analyze(&uniform(100, 100, 128), &ExposureConfig::default());
        let report = outcome.report;
        assert_eq!(report.mean_brightness, 128.0);
        assert_eq!(report.contrast, 0.0);
        assert_eq!(report.dynamic_range, 0.0);
        assert!(!report.is_underexposed);
        assert!(!report.is_overexposed);
        assert_eq!(report.midtones_percentage, 100.0);
    }

    #[test]
    fn test_solid_white_is_overexposed() {
        let outcome = analyze(&uniform(100, 100, 255), &ExposureConfig::default());
        let report = outcome.report;
        assert_eq!(report.mean_brightness, 255.0);
        assert!(report.is_overexposed);
        assert!(!report.is_underexposed);
        assert_eq!(report.shadows_percentage, 0.0);
        assert_eq!(report.highlights_percentage, 100.0);
    }

    #[test]
    fn test_solid_black_is_underexposed() {
        let outcome = analyze(&uniform(64, 64, 0), &ExposureConfig::default());
        assert!(outcome.report.is_underexposed);
        assert!(!outcome.report.is_overexposed);
        assert_eq!(outcome.report.shadows_percentage, 100.0);
    }

    #[test]
    fn test_split_image_bimodal_histogram() {
        // Left half white, right half black: exactly two populated bins.
        let img = GrayImage::from_fn(100, 100, |x, _| {
            if x < 50 {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });
        let hist = Histogram::from_luma(&img);
        assert_eq!(hist.populated_bins(), 2);
        assert_eq!(hist.count(0), 5000);
        assert_eq!(hist.count(255), 5000);
        assert_eq!(hist.min_value(), 0);
        assert_eq!(hist.max_value(), 255);
    }

    #[test]
    fn test_bands_match_report_percentages() {
        let img = GrayImage::from_fn(90, 1, |x, _| {
            // 30 shadow, 30 midtone, 30 highlight pixels
            let v = match x / 30 {
                0 => 10u8,
                1 => 120,
                _ => 240,
            };
            Luma([v])
        });
        let outcome = analyze(&img, &ExposureConfig::default());
        assert!((outcome.bands.shadow_percentage - outcome.report.shadows_percentage).abs() < 1e-12);
        assert!(
            (outcome.bands.highlight_percentage - outcome.report.highlights_percentage).abs()
                < 1e-12
        );
        assert!((outcome.report.shadows_percentage - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_brightness_offset_never_flips_bright_to_dark() {
        // Raising every pixel by a constant offset must never move the
        // classification from overexposed towards underexposed.
        let config = ExposureConfig::default();
        let base = 180u8;
        let mut was_under = analyze(&uniform(32, 32, base), &config).report.is_underexposed;
        for offset in [10u8, 30, 60, 75] {
            let value = base.saturating_add(offset);
            let report = analyze(&uniform(32, 32, value), &config).report;
            assert!(
                !(report.is_underexposed && !was_under),
                "classification moved darker at offset {offset}"
            );
            was_under = report.is_underexposed;
        }
    }

    #[test]
    fn test_custom_thresholds() {
        let config = ExposureConfig {
            dark_threshold: 50.0,
            bright_threshold: 240.0,
            ..Default::default()
        };
        let report = analyze(&uniform(16, 16, 80), &config).report;
        assert!(!report.is_underexposed);

        let report = analyze(&uniform(16, 16, 230), &config).report;
        assert!(!report.is_overexposed);
    }

    #[test]
    fn test_dynamic_range_spans_extremes() {
        let img = GrayImage::from_fn(4, 1, |x, _| Luma([if x == 0 { 3 } else { 250 }]));
        let report = analyze(&img, &ExposureConfig::default()).report;
        assert_eq!(report.dynamic_range, 247.0);
        assert_eq!(report.min_value, 3);
        assert_eq!(report.max_value, 250);
    }
}
