//! End-to-end checks of the scanner and renderer through the public API.

use image::{ImageEncoder, RgbImage};
use instant_gallery::config::GalleryConfig;
use instant_gallery::generate::{self, PageContext};
use instant_gallery::scan::{IMAGE_EXTENSIONS, scan};
use instant_gallery::types::{ImageRecord, RenderOptions};
use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, UNIX_EPOCH};
use tempfile::TempDir;

fn set_mtime(path: &Path, secs: u64) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
}

/// Solid-color PNG padded with trailing zeros to exactly `size` bytes.
fn write_padded_png(dir: &Path, name: &str, width: u32, height: u32, size: usize) {
    let pixels = RgbImage::from_pixel(width, height, image::Rgb([200, 120, 40]));
    let mut bytes = Vec::new();
    image::codecs::png::PngEncoder::new(&mut bytes)
        .write_image(pixels.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
    assert!(bytes.len() <= size, "encoded PNG is larger than {size} bytes");
    bytes.resize(size, 0);
    fs::write(dir.join(name), bytes).unwrap();
}

fn names(records: &[ImageRecord]) -> Vec<&str> {
    records.iter().map(|r| r.filename.as_str()).collect()
}

fn render(records: &[ImageRecord]) -> String {
    let ctx = PageContext {
        title: "Gallery",
        directory: "/photos",
        options: RenderOptions::default(),
        css: "",
    };
    generate::render_gallery(records, &ctx).into_string()
}

#[test]
fn newest_first_with_corrupt_image_kept() {
    let tmp = TempDir::new().unwrap();
    write_padded_png(tmp.path(), "a.png", 100, 50, 2048);
    fs::write(tmp.path().join("b.jpg"), b"definitely not a jpeg").unwrap();
    set_mtime(&tmp.path().join("a.png"), 1_000);
    set_mtime(&tmp.path().join("b.jpg"), 2_000);

    let records = scan(tmp.path(), IMAGE_EXTENSIONS);

    assert_eq!(names(&records), vec!["b.jpg", "a.png"]);
    assert_eq!((records[0].width, records[0].height), (0, 0));
    assert_eq!(records[0].size_bytes, 21);
    assert_eq!((records[1].width, records[1].height), (100, 50));
    assert_eq!(records[1].size_bytes, 2048);
}

#[test]
fn svg_explicit_size() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("logo.svg"),
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="120" height="80"><rect/></svg>"#,
    )
    .unwrap();

    let records = scan(tmp.path(), IMAGE_EXTENSIONS);
    assert_eq!((records[0].width, records[0].height), (120, 80));
}

#[test]
fn svg_view_box_fallback() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("chart.svg"),
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 300 150"><circle r="4"/></svg>"#,
    )
    .unwrap();

    let records = scan(tmp.path(), IMAGE_EXTENSIONS);
    assert_eq!((records[0].width, records[0].height), (300, 150));
}

#[test]
fn empty_directory_renders_empty_state() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("nested")).unwrap();
    fs::write(tmp.path().join("nested").join("inside.png"), b"x").unwrap();

    let records = scan(tmp.path(), IMAGE_EXTENSIONS);
    assert!(records.is_empty());

    let html = render(&records);
    assert!(html.contains("No Images Found"));
    assert!(html.contains("0 images found in current directory"));
}

#[test]
fn non_images_are_excluded() {
    let tmp = TempDir::new().unwrap();
    write_padded_png(tmp.path(), "a.png", 4, 4, 512);
    fs::write(tmp.path().join("notes.txt"), b"hello").unwrap();
    fs::write(tmp.path().join("index.html"), b"<html></html>").unwrap();

    let records = scan(tmp.path(), IMAGE_EXTENSIONS);
    assert_eq!(names(&records), vec!["a.png"]);

    let html = render(&records);
    assert!(!html.contains("notes.txt"));
    assert!(html.contains(r#"data-src="a.png""#));
}

#[test]
fn static_build_into_separate_directory() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_padded_png(src.path(), "a.png", 8, 8, 1024);
    fs::write(src.path().join("shape.svg"), r#"<svg width="10" height="20"/>"#).unwrap();

    let records = scan(src.path(), IMAGE_EXTENSIONS);
    let summary = generate::generate(
        src.path(),
        out.path(),
        &records,
        &GalleryConfig::default(),
        RenderOptions::default(),
    )
    .unwrap();

    assert_eq!(summary.image_count, 2);
    assert_eq!(summary.copied, 2);
    let html = fs::read_to_string(out.path().join("index.html")).unwrap();
    assert!(html.contains("2 images found in current directory"));
    assert_eq!(fs::metadata(out.path().join("a.png")).unwrap().len(), 1024);
}
