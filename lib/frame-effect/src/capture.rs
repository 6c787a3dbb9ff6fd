//! Still captures: encode a rendered frame and keep the recent shots around.
//!
//! Where the gallery ends up (local storage, a file, nothing) is up to the
//! host; this module only hands it a JSON document.

use crate::{FilterKind, FilterPipeline, FilterSettings, FrameEffectResult, PixelBuffer};
use chrono::{DateTime, Utc};
use image::ImageFormat;
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// Only this many of the newest photos are written out.
pub const MAX_SAVED_PHOTOS: usize = 10;

pub fn encode_png(image: &PixelBuffer) -> FrameEffectResult<Vec<u8>> {
    let mut data = Vec::new();
    image.write_to(&mut Cursor::new(&mut data), ImageFormat::Png)?;
    Ok(data)
}

pub fn decode_png(data: &[u8]) -> FrameEffectResult<PixelBuffer> {
    Ok(image::load_from_memory_with_format(data, ImageFormat::Png)?.to_rgba8())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Milliseconds since the epoch, unique within a gallery.
    pub id: i64,
    /// PNG bytes
    pub data: Vec<u8>,
    pub filter: FilterKind,
    pub brightness: i32,
    pub contrast: i32,
    pub timestamp: DateTime<Utc>,
}

impl Photo {
    pub fn new(data: Vec<u8>, settings: &FilterSettings, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: timestamp.timestamp_millis(),
            data,
            filter: settings.filter,
            brightness: settings.brightness,
            contrast: settings.contrast,
            timestamp,
        }
    }

    pub fn download_name(&self) -> String {
        format!("gamer-photo-{}.png", self.timestamp.timestamp_millis())
    }

    pub fn decode(&self) -> FrameEffectResult<PixelBuffer> {
        decode_png(&self.data)
    }
}

/// Captured photos, newest first, plus the one currently selected.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    photos: Vec<Photo>,
    current: Option<i64>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `frame` with `settings`, encode it and make it the current photo.
    pub fn capture(
        &mut self,
        pipeline: &FilterPipeline,
        mut frame: PixelBuffer,
        settings: &FilterSettings,
    ) -> FrameEffectResult<&Photo> {
        pipeline.render(&mut frame, settings)?;
        let data = encode_png(&frame)?;
        Ok(self.add(Photo::new(data, settings, Utc::now())))
    }

    pub fn add(&mut self, mut photo: Photo) -> &Photo {
        // two shots inside the same millisecond still need distinct ids
        if let Some(newest) = self.photos.first() {
            if photo.id <= newest.id {
                photo.id = newest.id + 1;
            }
        }

        log::info!(
            "captured photo {} ({} bytes, filter={})",
            photo.id,
            photo.data.len(),
            photo.filter
        );

        self.current = Some(photo.id);
        self.photos.insert(0, photo);
        &self.photos[0]
    }

    pub fn select(&mut self, id: i64) -> Option<&Photo> {
        let photo = self.photos.iter().find(|p| p.id == id)?;
        self.current = Some(id);
        Some(photo)
    }

    pub fn current(&self) -> Option<&Photo> {
        let id = self.current?;
        self.photos.iter().find(|p| p.id == id)
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn to_json(&self) -> FrameEffectResult<String> {
        let keep = self.photos.len().min(MAX_SAVED_PHOTOS);
        if keep < self.photos.len() {
            log::debug!("saving {} of {} photos", keep, self.photos.len());
        }

        Ok(serde_json::to_string(&self.photos[..keep])?)
    }

    /// Restore a saved gallery, selecting the newest photo.
    pub fn from_json(text: &str) -> FrameEffectResult<Self> {
        let photos: Vec<Photo> = serde_json::from_str(text)?;
        let current = photos.first().map(|p| p.id);
        Ok(Self { photos, current })
    }
}
