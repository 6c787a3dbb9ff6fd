//! Channel-shift glitch with sparse white speckles.
//!
//! The speckle pass is random. Use [`GlitchConfig::apply_with_rng`] with a
//! seeded generator when the output has to be reproducible.

use crate::{Effect, FrameEffectError, FrameEffectResult, PixelBuffer, frame::CHANNELS};
use derivative::Derivative;
use derive_setters::Setters;
use rand::Rng;

#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct GlitchConfig {
    /// Red is pulled from `x + shift`, green from `x - shift`.
    #[derivative(Default(value = "2"))]
    shift: u32,

    /// Speckle scan advances by a uniform step in `1..=max_stride`.
    #[derivative(Default(value = "5"))]
    max_stride: usize,

    #[derivative(Default(value = "0.1"))]
    noise_probability: f64,
}

impl GlitchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_with_rng<R: Rng + ?Sized>(
        &self,
        image: &mut PixelBuffer,
        rng: &mut R,
    ) -> FrameEffectResult<()> {
        if self.max_stride == 0 {
            return Err(FrameEffectError::InvalidParameter(
                "glitch stride must be positive".to_string(),
            ));
        }

        self.shift_channels(image);
        self.speckle(image, rng);
        Ok(())
    }

    fn shift_channels(&self, image: &mut PixelBuffer) {
        let (width, height) = image.dimensions();
        let snapshot = image.clone();

        for y in 0..height {
            for x in 0..width {
                if let Some(sx) = x.checked_add(self.shift).filter(|sx| *sx < width) {
                    image.get_pixel_mut(x, y)[0] = snapshot.get_pixel(sx, y)[0];
                }
            }

            for x in (0..width).rev() {
                if let Some(sx) = x.checked_sub(self.shift) {
                    image.get_pixel_mut(x, y)[1] = snapshot.get_pixel(sx, y)[1];
                }
            }
        }
    }

    fn speckle<R: Rng + ?Sized>(&self, image: &mut PixelBuffer, rng: &mut R) {
        let probability = self.noise_probability.clamp(0.0, 1.0);
        let data: &mut [u8] = &mut **image;

        let mut i = 0;
        while i < data.len() {
            if i % CHANNELS != CHANNELS - 1 && rng.random_bool(probability) {
                data[i] = 255;
            }
            i += rng.random_range(1..=self.max_stride);
        }
    }
}

impl Effect for GlitchConfig {
    fn apply(&self, image: &mut PixelBuffer) -> FrameEffectResult<()> {
        self.apply_with_rng(image, &mut rand::rng())
    }
}
