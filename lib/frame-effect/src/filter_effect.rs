use crate::{Effect, FrameEffectResult, PixelBuffer};
use derivative::Derivative;
use derive_setters::Setters;

/// Sepia tone configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct SepiaConfig {
    #[derivative(Default(value = "1.0"))]
    intensity: f32,
}

impl SepiaConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for SepiaConfig {
    fn apply(&self, image: &mut PixelBuffer) -> FrameEffectResult<()> {
        let intensity = self.intensity.clamp(0.0, 1.0);

        for pixel in image.pixels_mut() {
            let r = pixel[0] as f32;
            let g = pixel[1] as f32;
            let b = pixel[2] as f32;

            let tr = (0.393 * r + 0.769 * g + 0.189 * b).min(255.0);
            let tg = (0.349 * r + 0.686 * g + 0.168 * b).min(255.0);
            let tb = (0.272 * r + 0.534 * g + 0.131 * b).min(255.0);

            pixel[0] = (r * (1.0 - intensity) + tr * intensity).round() as u8;
            pixel[1] = (g * (1.0 - intensity) + tg * intensity).round() as u8;
            pixel[2] = (b * (1.0 - intensity) + tb * intensity).round() as u8;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame;

    #[test]
    fn test_sepia_full_strength() {
        let mut image = frame::filled(1, 1, [100, 100, 100, 200]);
        SepiaConfig::new().apply(&mut image).unwrap();
        // 100 * (0.393 + 0.769 + 0.189), 100 * 1.203, 100 * 0.937
        assert_eq!(image.get_pixel(0, 0).0, [135, 120, 94, 200]);
    }

    #[test]
    fn test_sepia_saturates_white() {
        let mut image = frame::filled(1, 1, [255, 255, 255, 255]);
        SepiaConfig::new().apply(&mut image).unwrap();
        assert_eq!(image.get_pixel(0, 0).0, [255, 255, 239, 255]);
    }

    #[test]
    fn test_sepia_zero_intensity_is_identity() {
        let mut image = frame::filled(2, 2, [12, 34, 56, 78]);
        SepiaConfig::new().with_intensity(0.0).apply(&mut image).unwrap();
        assert_eq!(image.get_pixel(1, 1).0, [12, 34, 56, 78]);
    }
}
