//! Sharpness and noise analysis.
//!
//! Sharpness is the variance of a 4-neighbor Laplacian response; the raw
//! score is always reported alongside the qualitative level so callers can
//! apply their own cut points. Noise is estimated from local intensity
//! residuals in flat (low-gradient) regions only, so real edges do not
//! inflate the estimate.

use image::GrayImage;

use crate::analyzers::gradient::GradientField;
use crate::config::QualityConfig;
use crate::domain::{QualityReport, SharpnessLevel};

/// Analyzes sharpness and noise from the shared grayscale buffer.
///
/// Never fails: degenerate images (no interior pixels, no flat regions)
/// yield zero scores and the lowest sharpness level.
#[must_use]
pub fn analyze(gray: &GrayImage, config: &QualityConfig) -> QualityReport {
    let field = GradientField::sobel(gray);

    let sharpness_score = laplacian_variance(gray);
    let sharpness_level = classify_sharpness(sharpness_score, &config.sharpness_cut_points);
    let edge_density = edge_density(&field, config.edge_magnitude_threshold);
    let noise_level = flat_region_noise(gray, &field, config.flat_magnitude_threshold);

    QualityReport {
        sharpness_score,
        sharpness_level,
        edge_density,
        noise_level,
    }
}

/// Maps a Laplacian-variance score to a qualitative level.
///
/// Pure so tests can verify the score and the label independently.
#[must_use]
pub fn classify_sharpness(score: f64, cut_points: &[f64; 4]) -> SharpnessLevel {
    if score < cut_points[0] {
        SharpnessLevel::VeryBlurry
    } else if score < cut_points[1] {
        SharpnessLevel::Blurry
    } else if score < cut_points[2] {
        SharpnessLevel::Acceptable
    } else if score < cut_points[3] {
        SharpnessLevel::Sharp
    } else {
        SharpnessLevel::VerySharp
    }
}

/// Variance of the 4-neighbor Laplacian over interior pixels.
#[allow(clippy::cast_precision_loss)]
fn laplacian_variance(gray: &GrayImage) -> f64 {
    let width = gray.width();
    let height = gray.height();
    if width < 3 || height < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    let mut count = 0u64;

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let center = f64::from(gray.get_pixel(x, y).0[0]);
            let up = f64::from(gray.get_pixel(x, y - 1).0[0]);
            let down = f64::from(gray.get_pixel(x, y + 1).0[0]);
            let left = f64::from(gray.get_pixel(x - 1, y).0[0]);
            let right = f64::from(gray.get_pixel(x + 1, y).0[0]);

            let response = 4.0 * center - up - down - left - right;
            sum += response;
            sum_sq += response * response;
            count += 1;
        }
    }

    if count == 0 {
        return 0.0;
    }
    let n = count as f64;
    let mean = sum / n;
    (sum_sq / n - mean * mean).max(0.0)
}

/// Fraction of pixels whose gradient magnitude exceeds the edge threshold.
#[allow(clippy::cast_precision_loss)]
fn edge_density(field: &GradientField, threshold: f64) -> f64 {
    let total = u64::from(field.width()) * u64::from(field.height());
    if total == 0 {
        return 0.0;
    }

    let mut edges = 0u64;
    for y in 0..field.height() {
        for x in 0..field.width() {
            if field.magnitude(x, y) > threshold {
                edges += 1;
            }
        }
    }
    edges as f64 / total as f64
}

/// Standard deviation of (pixel - 3x3 local mean) over flat pixels only.
#[allow(clippy::cast_precision_loss)]
fn flat_region_noise(gray: &GrayImage, field: &GradientField, flat_threshold: f64) -> f64 {
    let width = gray.width();
    let height = gray.height();
    if width < 3 || height < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    let mut count = 0u64;

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            if field.magnitude(x, y) >= flat_threshold {
                continue;
            }

            let mut local_sum = 0.0;
            for dy in 0..3u32 {
                for dx in 0..3u32 {
                    local_sum += f64::from(gray.get_pixel(x + dx - 1, y + dy - 1).0[0]);
                }
            }
            let residual = f64::from(gray.get_pixel(x, y).0[0]) - local_sum / 9.0;
            sum += residual;
            sum_sq += residual * residual;
            count += 1;
        }
    }

    if count == 0 {
        return 0.0;
    }
    let n = count as f64;
    let mean = sum / n;
    (sum_sq / n - mean * mean).max(0.0).sqrt()
}
