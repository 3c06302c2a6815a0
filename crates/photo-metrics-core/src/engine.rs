//! Analysis entry point.

use tracing::debug;

use crate::analyzers::{color, composition, exposure, lighting, quality};
use crate::config::AnalysisConfig;
use crate::domain::{BasicInfo, ImageInfo, TechnicalReport};
use crate::error::EngineError;

/// Runs every analyzer over the image and assembles the full report.
///
/// Grayscale and RGB buffers are materialized once and shared; exposure
/// runs before lighting, which consumes its band percentages. All thresholds
/// are read from a sanitized copy of `config`, so out-of-range values fall
/// back to their defaults instead of failing the call.
///
/// # Errors
///
/// Returns [`EngineError::Size`] when either dimension is zero.
pub fn analyze_image(
    info: &ImageInfo,
    config: &AnalysisConfig,
) -> Result<TechnicalReport, EngineError> {
    if info.width == 0 || info.height == 0 {
        return Err(EngineError::Size {
            width: info.width,
            height: info.height,
        });
    }

    let config = config.sanitized();

    let gray = info.to_luma8();
    let rgb = info.to_rgb8();
    debug!(
        source = %info.source,
        width = info.width,
        height = info.height,
        channels = info.channels,
        "starting analysis"
    );

    let exposure = exposure::analyze(&gray, &config.exposure);
    let quality = quality::analyze(&gray, &config.quality);
    let lighting = lighting::analyze(&gray, &rgb, exposure.bands, &config.lighting);
    let composition = composition::analyze(&gray, &config.composition);
    let color = color::analyze(&rgb, &config.color);

    debug!(
        source = %info.source,
        mean_brightness = exposure.report.mean_brightness,
        sharpness = quality.sharpness_score,
        "analysis complete"
    );

    Ok(TechnicalReport {
        basic_info: basic_info(info),
        exposure: exposure.report,
        quality,
        lighting,
        composition,
        color,
    })
}

fn basic_info(info: &ImageInfo) -> BasicInfo {
    BasicInfo {
        width: info.width,
        height: info.height,
        aspect_ratio: f64::from(info.width) / f64::from(info.height),
        channels: info.channels,
        total_pixels: info.total_pixels(),
    }
}
