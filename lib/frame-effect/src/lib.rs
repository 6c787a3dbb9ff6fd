pub mod base_effect;
pub mod capture;
pub mod filter_effect;
pub mod frame;
pub mod glitch_effect;
pub mod pipeline;
pub mod stylized_effect;

pub use frame::PixelBuffer;
pub use pipeline::{FilterKind, FilterPipeline, FilterSettings};

pub type FrameEffectResult<T> = Result<T, FrameEffectError>;

#[derive(thiserror::Error, Debug)]
pub enum FrameEffectError {
    #[error("Invalid buffer: {len} bytes can't hold a {width}x{height} RGBA frame")]
    InvalidBuffer { width: u32, height: u32, len: usize },
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// An in-place transform over a whole frame.
pub trait Effect {
    fn apply(&self, image: &mut PixelBuffer) -> FrameEffectResult<()>;
}
