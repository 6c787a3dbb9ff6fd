use crate::{Effect, FrameEffectResult, PixelBuffer};
use derivative::Derivative;
use derive_setters::Setters;

/// Slider value that leaves brightness or contrast untouched.
pub const NEUTRAL_TONE: i32 = 100;
pub const MAX_TONE: i32 = 200;

/// Out-of-range slider values are clamped, never rejected.
pub fn clamp_tone(value: i32) -> i32 {
    value.clamp(0, MAX_TONE)
}

#[inline]
fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Invert the colors of an image
pub fn invert(image: &mut PixelBuffer) -> FrameEffectResult<()> {
    for pixel in image.pixels_mut() {
        pixel[0] = 255 - pixel[0];
        pixel[1] = 255 - pixel[1];
        pixel[2] = 255 - pixel[2];
    }

    Ok(())
}

/// Luminance grayscale
#[derive(Debug, Clone, Copy, Default)]
pub struct GrayscaleConfig;

impl GrayscaleConfig {
    pub fn new() -> Self {
        Self
    }
}

/// Human perception weighting: 0.299*R + 0.587*G + 0.114*B
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64
}

impl Effect for GrayscaleConfig {
    fn apply(&self, image: &mut PixelBuffer) -> FrameEffectResult<()> {
        for pixel in image.pixels_mut() {
            let gray = to_channel(luminance(pixel[0], pixel[1], pixel[2]));

            pixel[0] = gray;
            pixel[1] = gray;
            pixel[2] = gray;
        }

        Ok(())
    }
}

/// Brightness and contrast sliders, both in [0, 200] with 100 as neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct ToneConfig {
    #[derivative(Default(value = "NEUTRAL_TONE"))]
    brightness: i32,

    #[derivative(Default(value = "NEUTRAL_TONE"))]
    contrast: i32,
}

impl ToneConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn brightness(&self) -> i32 {
        clamp_tone(self.brightness)
    }

    pub fn contrast(&self) -> i32 {
        clamp_tone(self.contrast)
    }

    pub fn is_neutral(&self) -> bool {
        self.brightness() == NEUTRAL_TONE && self.contrast() == NEUTRAL_TONE
    }

    /// Offset added to R, G and B: -255 at 0, +255 at 200.
    pub fn brightness_offset(&self) -> f64 {
        (self.brightness() - NEUTRAL_TONE) as f64 * 2.55
    }

    /// `259 * (c + 255) / (255 * (259 - c))` where `c` is the slider moved into
    /// [-255, 255]. `c` never reaches 259.
    pub fn contrast_factor(&self) -> f64 {
        let c = (self.contrast() - NEUTRAL_TONE) as f64 * 2.55;
        259.0 * (c + 255.0) / (255.0 * (259.0 - c))
    }
}

impl Effect for ToneConfig {
    fn apply(&self, image: &mut PixelBuffer) -> FrameEffectResult<()> {
        let offset = self.brightness_offset();
        let factor = self.contrast_factor();

        for pixel in image.pixels_mut() {
            for i in 0..3 {
                let bright = to_channel(pixel[i] as f64 + offset) as f64;
                pixel[i] = to_channel(factor * (bright - 128.0) + 128.0);
            }
        }

        Ok(())
    }
}

/// Contrast boost around mid-gray, `amount` in percent (20.0 => x1.2)
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct ContrastConfig {
    #[derivative(Default(value = "20.0"))]
    amount: f32,
}

impl ContrastConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for ContrastConfig {
    fn apply(&self, image: &mut PixelBuffer) -> FrameEffectResult<()> {
        let factor = 1.0 + (self.amount as f64 / 100.0);

        for pixel in image.pixels_mut() {
            for i in 0..3 {
                pixel[i] = to_channel((pixel[i] as f64 - 128.0) * factor + 128.0);
            }
        }

        Ok(())
    }
}

/// Saturation adjustment configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct SaturationConfig {
    #[derivative(Default(value = "0.2"))]
    amount: f32,
}

impl SaturationConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for SaturationConfig {
    fn apply(&self, image: &mut PixelBuffer) -> FrameEffectResult<()> {
        // amount > 0 pushes channels away from the pixel's gray, < 0 pulls them in
        let adjustment = 1.0 + self.amount as f64;

        for pixel in image.pixels_mut() {
            let gray = luminance(pixel[0], pixel[1], pixel[2]);

            for i in 0..3 {
                let val = pixel[i] as f64;
                pixel[i] = to_channel(gray + (val - gray) * adjustment);
            }
        }

        Ok(())
    }
}

/// Hue rotation configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct HueRotateConfig {
    #[derivative(Default(value = "90"))]
    degrees: i32,
}

impl HueRotateConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for HueRotateConfig {
    fn apply(&self, image: &mut PixelBuffer) -> FrameEffectResult<()> {
        // RGB -> HSL, rotate H, back to RGB
        let degrees = self.degrees.rem_euclid(360) as f32;

        for pixel in image.pixels_mut() {
            let r = pixel[0] as f32 / 255.0;
            let g = pixel[1] as f32 / 255.0;
            let b = pixel[2] as f32 / 255.0;

            let max = r.max(g).max(b);
            let min = r.min(g).min(b);
            let delta = max - min;

            let lightness = (max + min) / 2.0;
            let saturation = if delta == 0.0 {
                0.0
            } else {
                delta / (1.0 - (2.0 * lightness - 1.0).abs())
            };

            let mut hue = if delta == 0.0 {
                0.0
            } else if max == r {
                60.0 * (((g - b) / delta) % 6.0)
            } else if max == g {
                60.0 * (((b - r) / delta + 2.0) % 6.0)
            } else {
                60.0 * (((r - g) / delta + 4.0) % 6.0)
            };

            if hue < 0.0 {
                hue += 360.0;
            }

            let hue = (hue + degrees) % 360.0;

            let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
            let x = c * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
            let m = lightness - c / 2.0;

            let (r_new, g_new, b_new) = if hue < 60.0 {
                (c, x, 0.0)
            } else if hue < 120.0 {
                (x, c, 0.0)
            } else if hue < 180.0 {
                (0.0, c, x)
            } else if hue < 240.0 {
                (0.0, x, c)
            } else if hue < 300.0 {
                (x, 0.0, c)
            } else {
                (c, 0.0, x)
            };

            pixel[0] = to_channel(((r_new + m) * 255.0) as f64);
            pixel[1] = to_channel(((g_new + m) * 255.0) as f64);
            pixel[2] = to_channel(((b_new + m) * 255.0) as f64);
        }

        Ok(())
    }
}
