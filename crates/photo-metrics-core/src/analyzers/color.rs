//! Color analysis.
//!
//! Channel means and proportions, dominant colors, and mean saturation.
//! Dominant colors come from a coarse 5-bit-per-channel histogram: each
//! populated bucket is a candidate cluster, ranked by pixel count, with the
//! reported color being the true mean of the pixels in the bucket. This is
//! deterministic, unlike a seeded k-means, and resolves ties by bucket scan
//! order.

use image::RgbImage;

use crate::config::ColorConfig;
use crate::domain::{ColorReport, DominantColor};

/// Bits kept per channel when bucketing colors.
const BUCKET_BITS: u32 = 5;
const BUCKET_COUNT: usize = 1 << (3 * BUCKET_BITS);

/// Analyzes the color balance of the RGB buffer.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn analyze(rgb: &RgbImage, config: &ColorConfig) -> ColorReport {
    let total_pixels = u64::from(rgb.width()) * u64::from(rgb.height());

    let mut red_sum = 0u64;
    let mut green_sum = 0u64;
    let mut blue_sum = 0u64;
    let mut saturation_sum = 0.0f64;
    for pixel in rgb.pixels() {
        let [r, g, b] = pixel.0;
        red_sum += u64::from(r);
        green_sum += u64::from(g);
        blue_sum += u64::from(b);
        saturation_sum += saturation(r, g, b);
    }

    let denom = total_pixels as f64;
    let (red_mean, green_mean, blue_mean) = if total_pixels == 0 {
        (0.0, 0.0, 0.0)
    } else {
        (
            red_sum as f64 / denom,
            green_sum as f64 / denom,
            blue_sum as f64 / denom,
        )
    };

    let energy = red_sum + green_sum + blue_sum;
    let (red_proportion, green_proportion, blue_proportion) = if energy == 0 {
        (0.0, 0.0, 0.0)
    } else {
        let energy = energy as f64;
        (
            100.0 * red_sum as f64 / energy,
            100.0 * green_sum as f64 / energy,
            100.0 * blue_sum as f64 / energy,
        )
    };

    let mean_saturation = if total_pixels == 0 {
        0.0
    } else {
        100.0 * saturation_sum / denom
    };

    ColorReport {
        red_mean,
        green_mean,
        blue_mean,
        red_proportion,
        green_proportion,
        blue_proportion,
        dominant_colors: dominant_colors(rgb, config.dominant_color_count),
        mean_saturation,
    }
}

/// HSV saturation of one pixel, 0.0-1.0.
fn saturation(r: u8, g: u8, b: u8) -> f64 {
    let max = r.max(g).max(b);
    if max == 0 {
        return 0.0;
    }
    let min = r.min(g).min(b);
    f64::from(max - min) / f64::from(max)
}

#[derive(Clone, Copy, Default)]
struct Bucket {
    count: u64,
    red_sum: u64,
    green_sum: u64,
    blue_sum: u64,
}

/// Top `count` color buckets by coverage.
fn dominant_colors(rgb: &RgbImage, count: usize) -> Vec<DominantColor> {
    let total_pixels = u64::from(rgb.width()) * u64::from(rgb.height());
    if total_pixels == 0 || count == 0 {
        return Vec::new();
    }

    let mut buckets = vec![Bucket::default(); BUCKET_COUNT];
    for pixel in rgb.pixels() {
        let [r, g, b] = pixel.0;
        let index = bucket_index(r, g, b);
        let bucket = &mut buckets[index];
        bucket.count += 1;
        bucket.red_sum += u64::from(r);
        bucket.green_sum += u64::from(g);
        bucket.blue_sum += u64::from(b);
    }

    // Candidates come out in bucket index order; the stable sort keeps that
    // order among equal counts.
    let mut candidates: Vec<&Bucket> = buckets.iter().filter(|b| b.count > 0).collect();
    candidates.sort_by(|a, b| b.count.cmp(&a.count));

    candidates
        .into_iter()
        .take(count)
        .map(|bucket| {
            #[allow(clippy::cast_possible_truncation)]
            let rgb = [
                (bucket.red_sum / bucket.count) as u8,
                (bucket.green_sum / bucket.count) as u8,
                (bucket.blue_sum / bucket.count) as u8,
            ];
            #[allow(clippy::cast_precision_loss)]
            let coverage = bucket.count as f64 / total_pixels as f64;
            DominantColor { rgb, coverage }
        })
        .collect()
}

fn bucket_index(r: u8, g: u8, b: u8) -> usize {
    let r = usize::from(r >> (8 - BUCKET_BITS));
    let g = usize::from(g >> (8 - BUCKET_BITS));
    let b = usize::from(b >> (8 - BUCKET_BITS));
    (r << (2 * BUCKET_BITS)) | (g << BUCKET_BITS) | b
}
