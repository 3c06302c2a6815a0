//! Decoded image wrapper shared by all analyzers.

use image::DynamicImage;

/// A decoded image plus the basic facts every analyzer needs.
///
/// Owned exclusively by a single analysis call and never mutated after load.
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Where the image came from (file path or synthetic label).
    pub source: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Color channel count of the decoded buffer (1 for grayscale, 3 for RGB).
    pub channels: u8,
    /// Decoded pixel data.
    pub image: DynamicImage,
}

impl ImageInfo {
    /// Wraps a decoded image, caching its dimensions and channel count.
    #[must_use]
    pub fn new(source: impl Into<String>, image: DynamicImage) -> Self {
        let width = image.width();
        let height = image.height();
        let channels = match image.color() {
            image::ColorType::L8 | image::ColorType::L16 => 1,
            _ => 3,
        };
        Self {
            source: source.into(),
            width,
            height,
            channels,
            image,
        }
    }

    /// Single-channel luminance view, computed once per analysis call.
    #[must_use]
    pub fn to_luma8(&self) -> image::GrayImage {
        self.image.to_luma8()
    }

    /// Three-channel RGB view, computed once per analysis call.
    #[must_use]
    pub fn to_rgb8(&self) -> image::RgbImage {
        self.image.to_rgb8()
    }

    /// Total pixel count.
    #[must_use]
    pub const fn total_pixels(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    #[test]
    fn test_channels_for_gray_image() {
        let img = GrayImage::from_fn(4, 4, |_, _| Luma([7u8]));
        let info = ImageInfo::new("gray", DynamicImage::ImageLuma8(img));
        assert_eq!(info.channels, 1);
        assert_eq!(info.total_pixels(), 16);
    }

    #[test]
    fn test_channels_for_rgb_image() {
        let img = RgbImage::from_fn(3, 2, |_, _| Rgb([1u8, 2, 3]));
        let info = ImageInfo::new("rgb", DynamicImage::ImageRgb8(img));
        assert_eq!(info.channels, 3);
        assert_eq!(info.width, 3);
        assert_eq!(info.height, 2);
    }
}
