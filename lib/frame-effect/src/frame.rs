//! RGBA frame buffers handed over by the host on every tick.

use crate::{FrameEffectError, FrameEffectResult};
use image::{Rgba, RgbaImage, imageops};

pub type PixelBuffer = RgbaImage;

pub const CHANNELS: usize = 4;

pub fn expected_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * CHANNELS
}

/// Wrap raw RGBA bytes, rejecting any length other than `width * height * 4`.
pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> FrameEffectResult<PixelBuffer> {
    let len = data.len();
    if len != expected_len(width, height) {
        return Err(FrameEffectError::InvalidBuffer { width, height, len });
    }

    RgbaImage::from_raw(width, height, data)
        .ok_or(FrameEffectError::InvalidBuffer { width, height, len })
}

/// `RgbaImage` tolerates oversized containers, frames must not.
pub fn check(image: &PixelBuffer) -> FrameEffectResult<()> {
    let (width, height) = image.dimensions();
    let len = image.as_raw().len();

    if len != expected_len(width, height) {
        return Err(FrameEffectError::InvalidBuffer { width, height, len });
    }

    Ok(())
}

pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> PixelBuffer {
    RgbaImage::from_pixel(width, height, Rgba(rgba))
}

/// Mirror left-right, the way a webcam preview is shown to the person in front of it.
pub fn flip_horizontal(image: &mut PixelBuffer) {
    imageops::flip_horizontal_in_place(image);
}
