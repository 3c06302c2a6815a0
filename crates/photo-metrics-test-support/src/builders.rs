//! Synthetic image builders for testing.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use photo_metrics_core::domain::ImageInfo;

/// Builder for creating synthetic test images.
///
/// Provides convenience methods for generating images with known metric
/// outcomes (sharp, flat, underexposed, side-lit, mirrored, etc.).
pub struct SyntheticImageBuilder;

impl SyntheticImageBuilder {
    // === Sharpness / edge content ===

    /// Creates a high-contrast checkerboard (very sharp edges).
    #[must_use]
    pub fn checkerboard(width: u32, height: u32) -> ImageInfo {
        Self::checkerboard_with_cell_size(width, height, 8)
    }

    /// Creates a checkerboard with custom cell size.
    #[must_use]
    pub fn checkerboard_with_cell_size(width: u32, height: u32, cell_size: u32) -> ImageInfo {
        let img = GrayImage::from_fn(width, height, |x, y| {
            if (x / cell_size + y / cell_size) % 2 == 0 {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });
        ImageInfo::new("synthetic://checkerboard", DynamicImage::ImageLuma8(img))
    }

    /// Creates a uniform gray image (no edges at all).
    #[must_use]
    pub fn uniform_gray(width: u32, height: u32, value: u8) -> ImageInfo {
        let img = GrayImage::from_fn(width, height, |_, _| Luma([value]));
        ImageInfo::new("synthetic://uniform_gray", DynamicImage::ImageLuma8(img))
    }

    /// Creates a smooth horizontal ramp from black to white.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn horizontal_gradient(width: u32, height: u32) -> ImageInfo {
        let img = GrayImage::from_fn(width, height, |x, _| {
            let val = ((u32::from(u8::MAX) * x) / width.max(1)) as u8;
            Luma([val])
        });
        ImageInfo::new(
            "synthetic://horizontal_gradient",
            DynamicImage::ImageLuma8(img),
        )
    }

    // === Exposure ===

    /// Creates a completely black image (severely underexposed).
    #[must_use]
    pub fn underexposed(width: u32, height: u32) -> ImageInfo {
        Self::uniform_gray(width, height, 0)
    }

    /// Creates a completely white image (severely overexposed).
    #[must_use]
    pub fn overexposed(width: u32, height: u32) -> ImageInfo {
        Self::uniform_gray(width, height, 255)
    }

    /// Creates a well-exposed middle-gray image.
    #[must_use]
    pub fn well_exposed(width: u32, height: u32) -> ImageInfo {
        Self::uniform_gray(width, height, 128)
    }

    // === Lighting and composition ===

    /// Creates a white-left, black-right split frame.
    ///
    /// Left-lit, maximally asymmetric left-right, centroid in the left third.
    #[must_use]
    pub fn left_bright_split(width: u32, height: u32) -> ImageInfo {
        let img = GrayImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });
        ImageInfo::new("synthetic://left_bright", DynamicImage::ImageLuma8(img))
    }

    /// Creates bright sky over dark ground with a single sharp horizon.
    #[must_use]
    pub fn sky_over_ground(width: u32, height: u32) -> ImageInfo {
        let img = GrayImage::from_fn(width, height, |_, y| {
            if y < height / 2 {
                Luma([220u8])
            } else {
                Luma([40u8])
            }
        });
        ImageInfo::new("synthetic://sky_over_ground", DynamicImage::ImageLuma8(img))
    }

    /// Creates a left-right mirrored ramp (perfect horizontal symmetry).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn mirrored(width: u32, height: u32) -> ImageInfo {
        let img = GrayImage::from_fn(width, height, |x, _| {
            let d = x.min(width.saturating_sub(1 + x));
            let val = ((u32::from(u8::MAX) * d * 2) / width.max(1)) as u8;
            Luma([val])
        });
        ImageInfo::new("synthetic://mirrored", DynamicImage::ImageLuma8(img))
    }

    // === Color ===

    /// Creates a uniform RGB color image.
    #[must_use]
    pub fn rgb_uniform(width: u32, height: u32, r: u8, g: u8, b: u8) -> ImageInfo {
        let img = RgbImage::from_fn(width, height, |_, _| Rgb([r, g, b]));
        ImageInfo::new("synthetic://rgb_uniform", DynamicImage::ImageRgb8(img))
    }

    /// Creates an orange-toned image (warm color temperature).
    #[must_use]
    pub fn warm_image(width: u32, height: u32) -> ImageInfo {
        let img = RgbImage::from_fn(width, height, |_, _| Rgb([220u8, 140, 60]));
        ImageInfo::new("synthetic://warm", DynamicImage::ImageRgb8(img))
    }

    /// Creates a blue-toned image (cool color temperature).
    #[must_use]
    pub fn cool_image(width: u32, height: u32) -> ImageInfo {
        let img = RgbImage::from_fn(width, height, |_, _| Rgb([60u8, 140, 220]));
        ImageInfo::new("synthetic://cool", DynamicImage::ImageRgb8(img))
    }

    // === Edge cases ===

    /// Creates a 1x1 pixel image.
    #[must_use]
    pub fn single_pixel(value: u8) -> ImageInfo {
        let img = GrayImage::from_fn(1, 1, |_, _| Luma([value]));
        ImageInfo::new("synthetic://1x1", DynamicImage::ImageLuma8(img))
    }

    /// Creates a subject-style frame: busy checkerboard patch on a flat field.
    ///
    /// The patch pulls both the centroid and the edge activity towards the
    /// cell it sits in.
    #[must_use]
    pub fn busy_patch(width: u32, height: u32, patch_x: u32, patch_y: u32) -> ImageInfo {
        let side = (width.min(height) / 4).max(2);
        let img = GrayImage::from_fn(width, height, |x, y| {
            let inside = x >= patch_x
                && x < patch_x + side
                && y >= patch_y
                && y < patch_y + side;
            if inside {
                if (x / 2 + y / 2) % 2 == 0 {
                    Luma([255u8])
                } else {
                    Luma([200u8])
                }
            } else {
                Luma([20u8])
            }
        });
        ImageInfo::new("synthetic://busy_patch", DynamicImage::ImageLuma8(img))
    }
}
