//! Sobel gradient field shared by the quality and composition analyzers.

use image::GrayImage;

const SOBEL_X: [[f64; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: [[f64; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Per-pixel Sobel gradients over a grayscale buffer.
///
/// Borders are handled by clamping sample coordinates, so the field always
/// has the same dimensions as the input.
#[derive(Debug, Clone)]
pub struct GradientField {
    width: u32,
    height: u32,
    gx: Vec<f64>,
    gy: Vec<f64>,
}

impl GradientField {
    /// Computes the 3x3 Sobel response for every pixel.
    #[must_use]
    pub fn sobel(gray: &GrayImage) -> Self {
        let width = gray.width();
        let height = gray.height();
        let len = width as usize * height as usize;
        let mut gx = vec![0.0; len];
        let mut gy = vec![0.0; len];

        if width == 0 || height == 0 {
            return Self {
                width,
                height,
                gx,
                gy,
            };
        }

        for y in 0..height {
            let ys = [y.saturating_sub(1), y, (y + 1).min(height - 1)];
            for x in 0..width {
                let xs = [x.saturating_sub(1), x, (x + 1).min(width - 1)];

                let mut sum_x = 0.0;
                let mut sum_y = 0.0;
                for (ky, &yy) in ys.iter().enumerate() {
                    for (kx, &xx) in xs.iter().enumerate() {
                        let sample = f64::from(gray.get_pixel(xx, yy).0[0]);
                        sum_x += sample * SOBEL_X[ky][kx];
                        sum_y += sample * SOBEL_Y[ky][kx];
                    }
                }

                let idx = (y * width + x) as usize;
                gx[idx] = sum_x;
                gy[idx] = sum_y;
            }
        }

        Self {
            width,
            height,
            gx,
            gy,
        }
    }

    /// Field width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Field height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Horizontal gradient component at `(x, y)`.
    #[must_use]
    pub fn gx(&self, x: u32, y: u32) -> f64 {
        self.gx[(y * self.width + x) as usize]
    }

    /// Vertical gradient component at `(x, y)`.
    #[must_use]
    pub fn gy(&self, x: u32, y: u32) -> f64 {
        self.gy[(y * self.width + x) as usize]
    }

    /// Gradient magnitude at `(x, y)`.
    #[must_use]
    pub fn magnitude(&self, x: u32, y: u32) -> f64 {
        let idx = (y * self.width + x) as usize;
        self.gx[idx].hypot(self.gy[idx])
    }

    /// Gradient direction at `(x, y)` in degrees, range (-180, 180].
    ///
    /// The direction is perpendicular to any edge running through the pixel:
    /// a horizontal edge has a vertical gradient and vice versa.
    #[must_use]
    pub fn direction_degrees(&self, x: u32, y: u32) -> f64 {
        let idx = (y * self.width + x) as usize;
        self.gy[idx].atan2(self.gx[idx]).to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_uniform_image_has_zero_gradient() {
        let gray = GrayImage::from_fn(8, 8, |_, _| Luma([77u8]));
        let field = GradientField::sobel(&gray);
        for y in 0..8 {
            for x in 0..8 {
                assert!(field.magnitude(x, y).abs() < f64::EPSILON);
            }
        }
    }

    #[test]
    fn test_vertical_step_has_horizontal_gradient() {
        // Left half dark, right half bright: gradient points along +x.
        let gray = GrayImage::from_fn(8, 8, |x, _| {
            if x < 4 {
                Luma([0u8])
            } else {
                Luma([255u8])
            }
        });
        let field = GradientField::sobel(&gray);

        let mag = field.magnitude(4, 4);
        assert!(mag > 0.0, "boundary should have edge energy, got {mag}");
        assert!(field.gx(4, 4).abs() > field.gy(4, 4).abs());
        // Gradient direction near 0 degrees for a rising +x step
        assert!(field.direction_degrees(4, 4).abs() < 1.0);
    }

    #[test]
    fn test_horizontal_step_has_vertical_gradient() {
        let gray = GrayImage::from_fn(8, 8, |_, y| {
            if y < 4 {
                Luma([0u8])
            } else {
                Luma([255u8])
            }
        });
        let field = GradientField::sobel(&gray);

        assert!(field.gy(4, 4).abs() > field.gx(4, 4).abs());
        assert!((field.direction_degrees(4, 4) - 90.0).abs() < 1.0);
    }

    #[test]
    fn test_empty_image() {
        let gray = GrayImage::new(0, 0);
        let field = GradientField::sobel(&gray);
        assert_eq!(field.width(), 0);
        assert_eq!(field.height(), 0);
    }
}
