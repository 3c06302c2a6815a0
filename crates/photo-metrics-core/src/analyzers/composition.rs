//! Composition analysis.
//!
//! Covers the luminance centroid and its rule-of-thirds cell, edge activity
//! per grid cell, straight-line and horizon detection from the gradient
//! field, and mirror symmetry along both axes.

use image::GrayImage;

use crate::analyzers::gradient::GradientField;
use crate::config::CompositionConfig;
use crate::domain::{CompositionReport, GridCell, Offset, Point};

/// Analyzes composition from the grayscale buffer.
#[must_use]
pub fn analyze(gray: &GrayImage, config: &CompositionConfig) -> CompositionReport {
    let width = gray.width();
    let height = gray.height();

    let gradients = GradientField::sobel(gray);

    let visual_center = luminance_centroid(gray);
    let image_center = Point {
        x: width / 2,
        y: height / 2,
    };
    let center_offset = Offset {
        x: i64::from(visual_center.x) - i64::from(image_center.x),
        y: i64::from(visual_center.y) - i64::from(image_center.y),
    };
    let primary_interest = GridCell::from_position(visual_center.x, visual_center.y, width, height);
    let follows_rule_of_thirds =
        near_thirds_intersection(visual_center, width, height, config.thirds_tolerance);

    let (most_active_region, most_active_energy) = most_active_cell(&gradients, width, height);

    let lines = detect_lines(&gradients, width, height, config);

    let horizontal_symmetry = mirror_symmetry(gray, Axis::Horizontal);
    let vertical_symmetry = mirror_symmetry(gray, Axis::Vertical);
    let is_symmetric = horizontal_symmetry >= config.symmetry_tolerance
        || vertical_symmetry >= config.symmetry_tolerance;

    CompositionReport {
        visual_center,
        image_center,
        center_offset,
        primary_interest,
        follows_rule_of_thirds,
        most_active_region,
        most_active_energy,
        horizontal_lines: lines.horizontal,
        vertical_lines: lines.vertical,
        has_horizon: lines.has_horizon,
        horizontal_symmetry,
        vertical_symmetry,
        is_symmetric,
    }
}

/// Luminance-weighted centroid, clamped inside the frame.
///
/// An all-black frame has no centroid; the geometric center stands in.
fn luminance_centroid(gray: &GrayImage) -> Point {
    let width = gray.width();
    let height = gray.height();

    let mut weight = 0.0f64;
    let mut moment_x = 0.0f64;
    let mut moment_y = 0.0f64;
    for (x, y, pixel) in gray.enumerate_pixels() {
        let value = f64::from(pixel.0[0]);
        weight += value;
        moment_x += value * f64::from(x);
        moment_y += value * f64::from(y);
    }

    if weight <= 0.0 {
        return Point {
            x: width / 2,
            y: height / 2,
        };
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let x = ((moment_x / weight).round() as u32).min(width - 1);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let y = ((moment_y / weight).round() as u32).min(height - 1);

    Point { x, y }
}

/// True when the point lies within `tolerance` pixels of one of the four
/// rule-of-thirds intersections, measured per axis.
fn near_thirds_intersection(point: Point, width: u32, height: u32, tolerance: f64) -> bool {
    f64::from(thirds_line_distance(point.x, width)) <= tolerance
        && f64::from(thirds_line_distance(point.y, height)) <= tolerance
}

/// Distance to the nearest thirds line along one axis.
fn thirds_line_distance(position: u32, extent: u32) -> u32 {
    let third = extent / 3;
    position.abs_diff(third).min(position.abs_diff(2 * third))
}

/// Grid cell with the highest mean gradient magnitude.
///
/// Ties resolve to the first cell in scan order, so a featureless frame
/// reports the top-left cell with zero energy.
fn most_active_cell(gradients: &GradientField, width: u32, height: u32) -> (GridCell, f64) {
    let mut sums = [0.0f64; 9];
    let mut counts = [0u64; 9];

    for y in 0..height {
        for x in 0..width {
            let cell = GridCell::from_position(x, y, width, height);
            let index = GridCell::SCAN_ORDER
                .iter()
                .position(|c| *c == cell)
                .unwrap_or(0);
            sums[index] += gradients.magnitude(x, y);
            counts[index] += 1;
        }
    }

    let mut best = (GridCell::TopLeft, 0.0f64);
    for (index, cell) in GridCell::SCAN_ORDER.into_iter().enumerate() {
        if counts[index] == 0 {
            continue;
        }
        #[allow(clippy::cast_precision_loss)]
        let mean = sums[index] / counts[index] as f64;
        if mean > best.1 {
            best = (cell, mean);
        }
    }
    best
}

struct LineSummary {
    horizontal: usize,
    vertical: usize,
    has_horizon: bool,
}

/// Scanline line detector.
///
/// A horizontal line leaves a band of strong vertical gradients along one
/// row; a row qualifies when enough of its pixels carry an edge whose
/// gradient points within the angular tolerance of straight up or down.
/// Adjacent qualifying rows belong to the same physical line and merge.
/// Columns are treated the same way with the orientation gate rotated 90
/// degrees.
fn detect_lines(
    gradients: &GradientField,
    width: u32,
    height: u32,
    config: &CompositionConfig,
) -> LineSummary {
    let tolerance = config.angle_tolerance_degrees;
    let threshold = config.edge_magnitude_threshold;

    let row_required = (config.min_line_span * f64::from(width)).max(1.0);
    let horizon_required = (config.horizon_span * f64::from(width)).max(1.0);
    let column_required = (config.min_line_span * f64::from(height)).max(1.0);

    let mut horizontal = 0usize;
    let mut has_horizon = false;
    let mut in_run = false;
    let mut run_peak = 0u32;
    for y in 0..height {
        let mut edge_pixels = 0u32;
        for x in 0..width {
            if gradients.magnitude(x, y) > threshold
                && is_near_vertical_gradient(gradients.direction_degrees(x, y), tolerance)
            {
                edge_pixels += 1;
            }
        }
        if f64::from(edge_pixels) >= row_required {
            if !in_run {
                horizontal += 1;
                in_run = true;
                run_peak = 0;
            }
            run_peak = run_peak.max(edge_pixels);
            if f64::from(run_peak) >= horizon_required {
                has_horizon = true;
            }
        } else {
            in_run = false;
        }
    }

    let mut vertical = 0usize;
    let mut in_run = false;
    for x in 0..width {
        let mut edge_pixels = 0u32;
        for y in 0..height {
            if gradients.magnitude(x, y) > threshold
                && is_near_horizontal_gradient(gradients.direction_degrees(x, y), tolerance)
            {
                edge_pixels += 1;
            }
        }
        if f64::from(edge_pixels) >= column_required {
            if !in_run {
                vertical += 1;
                in_run = true;
            }
        } else {
            in_run = false;
        }
    }

    LineSummary {
        horizontal,
        vertical,
        has_horizon,
    }
}

/// Gradient pointing up or down, within tolerance. Marks a horizontal edge.
fn is_near_vertical_gradient(direction: f64, tolerance: f64) -> bool {
    (direction - 90.0).abs() <= tolerance || (direction + 90.0).abs() <= tolerance
}

/// Gradient pointing left or right, within tolerance. Marks a vertical edge.
fn is_near_horizontal_gradient(direction: f64, tolerance: f64) -> bool {
    direction.abs() <= tolerance || (180.0 - direction.abs()) <= tolerance
}

enum Axis {
    /// Left half against the mirrored right half.
    Horizontal,
    /// Top half against the mirrored bottom half.
    Vertical,
}

/// Mirror similarity on a 0-100 scale.
///
/// Mean absolute difference between the frame and its flip, mapped so a
/// perfect mirror scores 100 and maximal disagreement scores 0. A frame
/// thinner than two pixels along the axis is trivially symmetric.
fn mirror_symmetry(gray: &GrayImage, axis: Axis) -> f64 {
    let width = gray.width();
    let height = gray.height();

    let mut total = 0u64;
    let mut count = 0u64;
    match axis {
        Axis::Horizontal => {
            for y in 0..height {
                for x in 0..width / 2 {
                    let a = gray.get_pixel(x, y).0[0];
                    let b = gray.get_pixel(width - 1 - x, y).0[0];
                    total += u64::from(a.abs_diff(b));
                    count += 1;
                }
            }
        }
        Axis::Vertical => {
            for y in 0..height / 2 {
                for x in 0..width {
                    let a = gray.get_pixel(x, y).0[0];
                    let b = gray.get_pixel(x, height - 1 - y).0[0];
                    total += u64::from(a.abs_diff(b));
                    count += 1;
                }
            }
        }
    }

    if count == 0 {
        return 100.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let mean_diff = total as f64 / count as f64;
    100.0 * (1.0 - mean_diff / 255.0)
}
