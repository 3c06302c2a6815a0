//! Lighting analysis.
//!
//! Light direction comes from comparing mean brightness across vertical and
//! horizontal thirds of the frame; color temperature from the red/blue
//! channel balance. Shadow and highlight presence is derived from the
//! exposure analyzer's band percentages, which are passed in by value. This
//! is the single cross-analyzer dependency.

use image::{GrayImage, RgbImage};

use crate::analyzers::exposure::ExposureBands;
use crate::config::LightingConfig;
use crate::domain::{ColorTemperature, LightDirection, LightingReport};

/// Analyzes lighting from the shared buffers and the exposure bands.
#[must_use]
pub fn analyze(
    gray: &GrayImage,
    rgb: &RgbImage,
    bands: ExposureBands,
    config: &LightingConfig,
) -> LightingReport {
    let light_direction = light_direction(gray, config.direction_sensitivity);
    let color_temperature = color_temperature(rgb, config.temperature_margin);

    LightingReport {
        light_direction,
        color_temperature,
        shadow_percentage: bands.shadow_percentage,
        has_strong_shadows: bands.shadow_percentage > config.strong_shadow_percentage,
        highlight_percentage: bands.highlight_percentage,
        has_highlight_clipping: bands.highlight_percentage > config.highlight_clip_percentage,
    }
}

/// Classifies the dominant light direction from regional brightness.
///
/// Side light is checked before top/bottom light, matching the priority a
/// photographer gives to lateral modelling. Differences below `sensitivity`
/// resolve to even lighting.
fn light_direction(gray: &GrayImage, sensitivity: f64) -> LightDirection {
    let width = gray.width();
    let height = gray.height();
    if width < 3 || height < 3 {
        return LightDirection::Even;
    }

    let third_x = width / 3;
    let third_y = height / 3;

    let left = region_mean(gray, 0..third_x, 0..height);
    let center = region_mean(gray, third_x..2 * third_x, 0..height);
    let right = region_mean(gray, 2 * third_x..width, 0..height);
    let top = region_mean(gray, 0..width, 0..third_y);
    let bottom = region_mean(gray, 0..width, 2 * third_y..height);

    if left > center + sensitivity && left > right + sensitivity {
        LightDirection::Left
    } else if right > center + sensitivity && right > left + sensitivity {
        LightDirection::Right
    } else if top > bottom + sensitivity {
        LightDirection::Top
    } else if bottom > top + sensitivity {
        LightDirection::Bottom
    } else {
        LightDirection::Even
    }
}

/// Classifies warm/cool bias from the red/blue channel means.
fn color_temperature(rgb: &RgbImage, margin: f64) -> ColorTemperature {
    let total = u64::from(rgb.width()) * u64::from(rgb.height());
    if total == 0 {
        return ColorTemperature::Neutral;
    }

    let mut red_sum = 0u64;
    let mut blue_sum = 0u64;
    for pixel in rgb.pixels() {
        red_sum += u64::from(pixel.0[0]);
        blue_sum += u64::from(pixel.0[2]);
    }

    #[allow(clippy::cast_precision_loss)]
    let red_mean = red_sum as f64 / total as f64;
    #[allow(clippy::cast_precision_loss)]
    let blue_mean = blue_sum as f64 / total as f64;

    if red_mean > blue_mean + margin {
        ColorTemperature::Warm
    } else if blue_mean > red_mean + margin {
        ColorTemperature::Cool
    } else {
        ColorTemperature::Neutral
    }
}

/// Mean intensity over a rectangular region; 0 for an empty region.
#[allow(clippy::cast_precision_loss)]
fn region_mean(
    gray: &GrayImage,
    xs: std::ops::Range<u32>,
    ys: std::ops::Range<u32>,
) -> f64 {
    let mut sum = 0u64;
    let mut count = 0u64;
    for y in ys {
        for x in xs.clone() {
            sum += u64::from(gray.get_pixel(x, y).0[0]);
            count += 1;
        }
    }
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}
