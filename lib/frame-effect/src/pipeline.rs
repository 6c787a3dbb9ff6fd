use crate::{
    Effect, FrameEffectError, FrameEffectResult, PixelBuffer,
    base_effect::{GrayscaleConfig, HueRotateConfig, MAX_TONE, ToneConfig, clamp_tone, invert},
    filter_effect::SepiaConfig,
    frame,
    glitch_effect::GlitchConfig,
    stylized_effect::CartoonConfig,
};
use derivative::Derivative;
use derive_setters::Setters;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    TryFromPrimitive,
    IntoPrimitive,
    Serialize,
    Deserialize,
    Derivative,
)]
#[derivative(Default)]
#[repr(u8)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    #[derivative(Default)]
    None = 0,
    Grayscale,
    Sepia,
    Invert,
    HueRotate,
    Cartoon,
    Glitch,
}

impl FilterKind {
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::None => "none",
            FilterKind::Grayscale => "grayscale",
            FilterKind::Sepia => "sepia",
            FilterKind::Invert => "invert",
            FilterKind::HueRotate => "hue-rotate",
            FilterKind::Cartoon => "cartoon",
            FilterKind::Glitch => "glitch",
        }
    }

    pub fn all() -> &'static [FilterKind] {
        &[
            FilterKind::None,
            FilterKind::Grayscale,
            FilterKind::Sepia,
            FilterKind::Invert,
            FilterKind::HueRotate,
            FilterKind::Cartoon,
            FilterKind::Glitch,
        ]
    }

    /// Look up a filter by its position in the host's filter list.
    pub fn from_index(index: u8) -> FrameEffectResult<Self> {
        Self::try_from(index)
            .map_err(|_| FrameEffectError::InvalidFilter(format!("no filter at index {index}")))
    }

    /// Only glitch draws from `rng`.
    pub fn apply_with_rng<R: Rng + ?Sized>(
        &self,
        image: &mut PixelBuffer,
        rng: &mut R,
    ) -> FrameEffectResult<()> {
        match self {
            FilterKind::None => Ok(()),
            FilterKind::Grayscale => GrayscaleConfig::new().apply(image),
            FilterKind::Sepia => SepiaConfig::new().with_intensity(1.0).apply(image),
            FilterKind::Invert => invert(image),
            FilterKind::HueRotate => HueRotateConfig::new().with_degrees(90).apply(image),
            FilterKind::Cartoon => CartoonConfig::new().apply(image),
            FilterKind::Glitch => GlitchConfig::new().apply_with_rng(image, rng),
        }
    }
}

impl Effect for FilterKind {
    fn apply(&self, image: &mut PixelBuffer) -> FrameEffectResult<()> {
        self.apply_with_rng(image, &mut rand::rng())
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = FrameEffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        FilterKind::all()
            .iter()
            .find(|kind| kind.name() == name)
            .copied()
            .ok_or_else(|| FrameEffectError::InvalidFilter(s.to_string()))
    }
}

/// Host UI state for one frame: tone sliders plus the active filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Derivative, Setters, Serialize, Deserialize)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[serde(default)]
#[non_exhaustive]
pub struct FilterSettings {
    /// 0..=200, 100 = unchanged
    #[derivative(Default(value = "100"))]
    pub brightness: i32,

    /// 0..=200, 100 = unchanged
    #[derivative(Default(value = "100"))]
    pub contrast: i32,

    #[derivative(Default(value = "FilterKind::None"))]
    pub filter: FilterKind,

    /// Flip the frame left-right before anything else.
    #[derivative(Default(value = "false"))]
    pub mirror: bool,
}

impl FilterSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_brightness_clamped(mut self, brightness: i32) -> Self {
        self.brightness = clamp_tone(brightness);
        self
    }

    pub fn with_contrast_clamped(mut self, contrast: i32) -> Self {
        self.contrast = clamp_tone(contrast);
        self
    }

    pub fn tone(&self) -> ToneConfig {
        ToneConfig::new()
            .with_brightness(self.brightness)
            .with_contrast(self.contrast)
    }
}

/// Tone adjustment followed by the selected filter.
///
/// `preview` runs on every tick and `render` once per capture; both do the
/// same work. A pipeline never keeps a frame between calls.
#[derive(Debug, Clone, Default)]
pub struct FilterPipeline {
    seed: Option<u64>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the glitch noise so every call produces the same speckles.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn preview<'a>(
        &self,
        image: &'a mut PixelBuffer,
        settings: &FilterSettings,
    ) -> FrameEffectResult<&'a mut PixelBuffer> {
        self.run(image, settings)
    }

    pub fn render<'a>(
        &self,
        image: &'a mut PixelBuffer,
        settings: &FilterSettings,
    ) -> FrameEffectResult<&'a mut PixelBuffer> {
        log::debug!(
            "render {}x{} filter={} brightness={} contrast={}",
            image.width(),
            image.height(),
            settings.filter,
            settings.brightness,
            settings.contrast
        );

        self.run(image, settings)
    }

    /// Validate raw bytes from the frame source and run them through `render`.
    pub fn render_raw(
        &self,
        width: u32,
        height: u32,
        data: Vec<u8>,
        settings: &FilterSettings,
    ) -> FrameEffectResult<PixelBuffer> {
        let mut image = frame::from_raw(width, height, data)?;
        self.render(&mut image, settings)?;
        Ok(image)
    }

    fn run<'a>(
        &self,
        image: &'a mut PixelBuffer,
        settings: &FilterSettings,
    ) -> FrameEffectResult<&'a mut PixelBuffer> {
        frame::check(image)?;

        if clamp_tone(settings.brightness) != settings.brightness
            || clamp_tone(settings.contrast) != settings.contrast
        {
            log::debug!(
                "clamping tone brightness={} contrast={} into 0..={}",
                settings.brightness,
                settings.contrast,
                MAX_TONE
            );
        }

        if settings.mirror {
            frame::flip_horizontal(image);
        }

        let tone = settings.tone();
        if !tone.is_neutral() {
            tone.apply(image)?;
        }

        match self.seed {
            Some(seed) => settings
                .filter
                .apply_with_rng(image, &mut StdRng::seed_from_u64(seed))?,
            None => settings.filter.apply_with_rng(image, &mut rand::rng())?,
        }

        Ok(image)
    }
}
