//! Integration tests for image to XNB conversion.
//!
//! These tests drive the public conversion API against real files:
//! - single-file conversion from each supported input format
//! - directory (batch) conversion and its PNG filter
//! - usage errors that must not write anything
//!
//! Run with: `cargo test --test convert_integration`

use std::fs;
use std::path::Path;

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use tempfile::TempDir;

use xnbify::convert::{ConversionJob, ConvertError, ConvertOptions};
use xnbify::xnb::{EncodeOptions, Profile, XnbTexture, FORMAT};

// ============================================================================
// Helper Functions
// ============================================================================

/// A small opaque gradient with one fully transparent corner.
fn sample_rgba(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if x == 0 && y == 0 {
            Rgba([77, 88, 99, 0])
        } else {
            Rgba([(x * 40) as u8, (y * 40) as u8, 128, 255])
        }
    })
}

fn read_texture(path: &Path) -> XnbTexture {
    XnbTexture::decode(&fs::read(path).unwrap()).unwrap()
}

fn dir_entries(path: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(path)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ============================================================================
// Single File
// ============================================================================

#[test]
fn test_png_round_trip_with_transparency_normalized() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("sprite.png");
    sample_rgba(4, 3).save(&input).unwrap();

    let job = ConversionJob::resolve(&input, None).unwrap();
    let report = job.run(&ConvertOptions::default()).unwrap();
    assert_eq!(report.converted.len(), 1);

    let output = temp.path().join("sprite.xnb");
    let texture = read_texture(&output);
    assert_eq!((texture.width, texture.height), (4, 3));
    assert_eq!(texture.header.profile(), Profile::Reach);

    let mut expected = sample_rgba(4, 3);
    expected.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
    assert_eq!(texture.pixels(), expected.as_raw().as_slice());

    assert_eq!(
        fs::metadata(&output).unwrap().len() as usize,
        FORMAT.metadata_size() + 4 * 3 * 4
    );
}

#[test]
fn test_jpeg_is_converted_to_rgba() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("photo.jpg");
    let output = temp.path().join("photo.xnb");
    RgbImage::from_pixel(8, 8, Rgb([200, 100, 50]))
        .save(&input)
        .unwrap();

    ConversionJob::resolve(&input, Some(output.as_path()))
        .unwrap()
        .run(&ConvertOptions::default())
        .unwrap();

    // JPEG is lossy, so compare against what the decoder itself produces
    let decoded = image::open(&input).unwrap().to_rgba8();
    let texture = read_texture(&output);
    assert_eq!(texture.pixels(), decoded.as_raw().as_slice());
    assert!(texture.pixels().chunks_exact(4).all(|p| p[3] == 255));
}

#[test]
fn test_gif_single_file_is_converted() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("anim.gif");
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255])))
        .save(&input)
        .unwrap();

    let options = ConvertOptions::new(EncodeOptions::new().with_profile(Profile::HiDef))
        .with_verify(true);
    ConversionJob::resolve(&input, None)
        .unwrap()
        .run(&options)
        .unwrap();

    let texture = read_texture(&temp.path().join("anim.xnb"));
    assert_eq!(texture.header.profile(), Profile::HiDef);
    assert_eq!((texture.width, texture.height), (2, 2));
}

#[test]
fn test_identical_input_gives_identical_output() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("a.png");
    sample_rgba(5, 5).save(&input).unwrap();

    let first = temp.path().join("first.xnb");
    let second = temp.path().join("second.xnb");
    for output in [&first, &second] {
        ConversionJob::resolve(&input, Some(output.as_path()))
            .unwrap()
            .run(&ConvertOptions::default())
            .unwrap();
    }

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_compressed_request_fails_without_output() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("a.png");
    sample_rgba(2, 2).save(&input).unwrap();

    let options = ConvertOptions::new(EncodeOptions::new().with_compressed(true));
    let err = ConversionJob::resolve(&input, None)
        .unwrap()
        .run(&options)
        .unwrap_err();

    assert!(matches!(err, ConvertError::Unsupported(_)));
    assert!(!temp.path().join("a.xnb").exists());
}

// ============================================================================
// Directory
// ============================================================================

#[test]
fn test_directory_converts_only_png_files() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("art");
    let output = temp.path().join("content");
    fs::create_dir(&input).unwrap();
    fs::create_dir(&output).unwrap();

    sample_rgba(2, 2).save(input.join("a.png")).unwrap();
    DynamicImage::ImageRgba8(sample_rgba(2, 2))
        .save(input.join("b.gif"))
        .unwrap();

    let report = ConversionJob::resolve(&input, Some(output.as_path()))
        .unwrap()
        .run(&ConvertOptions::default())
        .unwrap();

    assert_eq!(report.converted.len(), 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(dir_entries(&output), vec!["a.xnb"]);
}

#[test]
fn test_directory_png_filter_ignores_case() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("art");
    let output = temp.path().join("content");
    fs::create_dir(&input).unwrap();
    fs::create_dir(&output).unwrap();

    sample_rgba(1, 1)
        .save_with_format(input.join("UPPER.PNG"), image::ImageFormat::Png)
        .unwrap();
    sample_rgba(1, 1).save(input.join("lower.png")).unwrap();

    ConversionJob::resolve(&input, Some(output.as_path()))
        .unwrap()
        .run(&ConvertOptions::default())
        .unwrap();

    assert_eq!(dir_entries(&output), vec!["UPPER.xnb", "lower.xnb"]);
}

#[test]
fn test_directory_without_output_is_usage_error() {
    let temp = TempDir::new().unwrap();
    sample_rgba(1, 1).save(temp.path().join("a.png")).unwrap();

    let err = ConversionJob::resolve(temp.path(), None).unwrap_err();
    assert!(err.is_usage());
    assert_eq!(dir_entries(temp.path()), vec!["a.png"]);
}

#[test]
fn test_directory_with_file_output_is_usage_error() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("art");
    fs::create_dir(&input).unwrap();
    sample_rgba(1, 1).save(input.join("a.png")).unwrap();

    let output = temp.path().join("out.xnb");
    let err = ConversionJob::resolve(&input, Some(output.as_path())).unwrap_err();
    assert!(err.is_usage());
    assert_eq!(dir_entries(temp.path()), vec!["art"]);
    assert_eq!(dir_entries(&input), vec!["a.png"]);
}
