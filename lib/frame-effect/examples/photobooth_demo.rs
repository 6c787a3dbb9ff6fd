/// Photobooth pipeline example
/// Runs a frame through every filter and captures the results into a gallery
///
/// cargo run -p frame-effect --example photobooth_demo [image.png]

use frame_effect::{
    FilterKind, FilterPipeline, FilterSettings,
    capture::Gallery,
};
use image::{ImageReader, Rgba, RgbaImage};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let frame = match std::env::args().nth(1) {
        Some(path) => ImageReader::open(path)?.decode()?.to_rgba8(),
        None => RgbaImage::from_fn(320, 240, |x, y| {
            let ring = ((x as i32 - 160).pow(2) + (y as i32 - 120).pow(2)) < 80 * 80;
            Rgba([(x * 255 / 320) as u8, (y * 255 / 240) as u8, if ring { 220 } else { 40 }, 255])
        }),
    };

    let pipeline = FilterPipeline::new();
    let mut gallery = Gallery::new();

    for kind in FilterKind::all() {
        let settings = FilterSettings::new()
            .with_brightness(110)
            .with_contrast(105)
            .with_mirror(true)
            .with_filter(*kind);

        let photo = gallery.capture(&pipeline, frame.clone(), &settings)?;
        std::fs::write(output_dir.join(photo.download_name().replace("gamer-photo", kind.name())), &photo.data)?;
        println!("✓ Captured {}", kind);
    }

    std::fs::write(output_dir.join("gallery.json"), gallery.to_json()?)?;

    println!("\n✓ {} photos captured, images saved to: tmp/", gallery.len());

    Ok(())
}
