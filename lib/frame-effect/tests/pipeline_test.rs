// cargo test -p frame-effect --test pipeline_test

use frame_effect::{
    FilterKind, FilterPipeline, FilterSettings, FrameEffectError, PixelBuffer,
    capture::{Gallery, decode_png},
    frame,
};
use image::{Rgba, RgbaImage};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn black(width: u32, height: u32) -> PixelBuffer {
    frame::filled(width, height, [0, 0, 0, 255])
}

fn webcam_like(width: u32, height: u32) -> PixelBuffer {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x ^ y) * 9 % 256) as u8,
            255,
        ])
    })
}

#[test]
fn test_black_frame_without_filter_is_unchanged() {
    let mut image = black(4, 4);
    FilterPipeline::new()
        .preview(&mut image, &FilterSettings::new())
        .unwrap();

    assert_eq!(image, black(4, 4));
}

#[test]
fn test_black_frame_inverted_is_white() {
    let mut image = black(4, 4);
    let settings = FilterSettings::new().with_filter(FilterKind::Invert);
    FilterPipeline::new().render(&mut image, &settings).unwrap();

    assert!(image.pixels().all(|p| p.0 == [255, 255, 255, 255]));
}

#[test]
fn test_full_brightness_saturates_black() {
    let mut image = black(4, 4);
    let settings = FilterSettings::new().with_brightness(200);
    FilterPipeline::new().render(&mut image, &settings).unwrap();

    assert!(image.pixels().all(|p| p.0 == [255, 255, 255, 255]));
}

#[test]
fn test_out_of_range_brightness_is_clamped() {
    init_logger();

    let mut clamped = webcam_like(8, 8);
    let mut max = clamped.clone();
    let pipeline = FilterPipeline::new();

    pipeline
        .render(&mut clamped, &FilterSettings::new().with_brightness(500))
        .unwrap();
    pipeline
        .render(&mut max, &FilterSettings::new().with_brightness(200))
        .unwrap();

    assert_eq!(clamped, max);
}

#[test]
fn test_negative_contrast_is_clamped() {
    init_logger();

    let mut clamped = webcam_like(8, 8);
    let pipeline = FilterPipeline::new();

    pipeline
        .render(&mut clamped, &FilterSettings::new().with_contrast(-40))
        .unwrap();

    // contrast 0 flattens everything to mid gray
    assert!(clamped.pixels().all(|p| p.0 == [128, 128, 128, 255]));
}

#[test]
fn test_preview_and_render_agree() {
    let pipeline = FilterPipeline::new().with_seed(99);

    for kind in FilterKind::all() {
        let settings = FilterSettings::new()
            .with_brightness(130)
            .with_contrast(80)
            .with_filter(*kind);

        let mut previewed = webcam_like(24, 18);
        let mut rendered = previewed.clone();
        pipeline.preview(&mut previewed, &settings).unwrap();
        pipeline.render(&mut rendered, &settings).unwrap();

        assert_eq!(previewed, rendered, "filter {kind}");
    }
}

#[test]
fn test_every_filter_keeps_alpha_and_size() {
    let pipeline = FilterPipeline::new().with_seed(3);

    for kind in FilterKind::all() {
        let original = webcam_like(16, 9);
        let mut image = original.clone();
        pipeline
            .render(&mut image, &FilterSettings::new().with_filter(*kind))
            .unwrap();

        assert_eq!(image.dimensions(), original.dimensions());
        assert_eq!(image.as_raw().len(), 16 * 9 * 4);
        assert!(image.pixels().all(|p| p[3] == 255), "filter {kind}");
    }
}

#[test]
fn test_render_raw_rejects_bad_length() {
    let err = FilterPipeline::new().render_raw(4, 4, vec![0; 63], &FilterSettings::new());
    assert!(matches!(
        err,
        Err(FrameEffectError::InvalidBuffer { width: 4, height: 4, len: 63 })
    ));
}

#[test]
fn test_render_raw_grayscale() {
    let data = [200u8, 100, 50, 255].repeat(6);
    let settings = FilterSettings::new().with_filter("grayscale".parse().unwrap());
    let image = FilterPipeline::new().render_raw(3, 2, data, &settings).unwrap();

    // 0.299 * 200 + 0.587 * 100 + 0.114 * 50 = 124.2
    assert!(image.pixels().all(|p| p.0 == [124, 124, 124, 255]));
}

#[test]
fn test_unknown_filter_name() {
    assert!(matches!(
        "posterize".parse::<FilterKind>(),
        Err(FrameEffectError::InvalidFilter(_))
    ));
}

#[test]
fn test_capture_into_gallery() {
    let mut gallery = Gallery::new();
    let settings = FilterSettings::new()
        .with_contrast(120)
        .with_filter(FilterKind::Cartoon);

    let photo = gallery
        .capture(&FilterPipeline::new(), webcam_like(10, 10), &settings)
        .unwrap()
        .clone();

    assert_eq!(photo.filter, FilterKind::Cartoon);
    assert_eq!(photo.contrast, 120);
    assert!(photo.download_name().starts_with("gamer-photo-"));

    let mut expected = webcam_like(10, 10);
    FilterPipeline::new().render(&mut expected, &settings).unwrap();
    assert_eq!(decode_png(&photo.data).unwrap(), expected);
    assert_eq!(gallery.current().unwrap().id, photo.id);
}
