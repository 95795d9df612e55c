//! HTML rendering.
//!
//! Turns an ordered list of [`ImageRecord`]s into the gallery page. The same
//! renderer backs both the static `build` command ([`generate`]) and every
//! `GET /` of the HTTP server.
//!
//! ## Page Structure
//!
//! - **Header**: title, image count, info toggle (ON/OFF badge), theme
//!   toggle, refresh button
//! - **Grid**: CSS-column masonry (1/2/3/4 columns at 640/1024/1280 px).
//!   Images start as an inline "Loading..." placeholder and swap in their
//!   real `data-src` when scrolled near the viewport.
//! - **Info overlays**: filename, size, and dimensions per image; rendered
//!   always, shown only while `body.show-info` is set
//! - **Empty state**: shown instead of the grid when nothing was found
//! - **Lightbox**: modal viewer with prev/next/close, keyboard navigation
//!   (Escape, ←, →), and an info panel
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: layout and component styles (colors injected from config)
//! - `static/gallery.js`: lazy loading, lightbox, toggles, scroll-to-top
//!
//! The script reads the image list from a `<script type="application/json">`
//! block holding the [`ImageRecord`] wire form.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Filenames are untrusted input; maud escapes every interpolation.

use crate::config::{self, GalleryConfig};
use crate::output::format_file_size;
use crate::scan::IMAGE_EXTENSIONS;
use crate::types::{ImageRecord, RenderOptions, Theme};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What [`generate`] wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    /// Path of the written `index.html`.
    pub page: PathBuf,
    /// Number of images on the page.
    pub image_count: usize,
    /// Number of image files copied next to the page.
    pub copied: usize,
}

/// Everything the page needs besides the records.
#[derive(Debug, Clone)]
pub struct PageContext<'a> {
    pub title: &'a str,
    /// Scanned directory, shown in the empty state.
    pub directory: &'a str,
    pub options: RenderOptions,
    /// Full stylesheet: color variables + static styles.
    pub css: &'a str,
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/gallery.js");

/// Gray "Loading..." card shown until the real image is requested.
const LOADING_PLACEHOLDER: &str = "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='400' height='300' viewBox='0 0 400 300'%3E%3Crect width='400' height='300' fill='%23f3f4f6'/%3E%3Ctext x='50%25' y='50%25' dominant-baseline='middle' text-anchor='middle' font-family='Arial' font-size='16' fill='%239ca3af'%3ELoading...%3C/text%3E%3C/svg%3E";

/// Characters left unescaped in an image URL path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Render the gallery page and write it to `output_dir/index.html`.
///
/// When `output_dir` is not `source` itself, the listed image files are
/// copied next to the page so its relative links resolve.
pub fn generate(
    source: &Path,
    output_dir: &Path,
    records: &[ImageRecord],
    config: &GalleryConfig,
    options: RenderOptions,
) -> Result<GenerateSummary, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let copied = if same_directory(source, output_dir) {
        0
    } else {
        copy_images(source, output_dir, records)?
    };

    let directory = display_directory(source);
    let page = render_page(records, config, options, &directory);
    let page_path = output_dir.join("index.html");
    fs::write(&page_path, page.into_string())?;

    Ok(GenerateSummary {
        page: page_path,
        image_count: records.len(),
        copied,
    })
}

/// Absolute form of `dir` for display, falling back to the path as given.
pub fn display_directory(dir: &Path) -> String {
    fs::canonicalize(dir)
        .unwrap_or_else(|_| dir.to_path_buf())
        .display()
        .to_string()
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn copy_images(
    source: &Path,
    output_dir: &Path,
    records: &[ImageRecord],
) -> std::io::Result<usize> {
    for record in records {
        fs::copy(source.join(&record.path), output_dir.join(&record.path))?;
    }
    Ok(records.len())
}

/// Render the complete page with the configured title and colors.
pub fn render_page(
    records: &[ImageRecord],
    config: &GalleryConfig,
    options: RenderOptions,
    directory: &str,
) -> Markup {
    let css = format!("{}\n\n{}", config::generate_color_css(&config.colors), CSS_STATIC);
    let ctx = PageContext {
        title: &config.title,
        directory,
        options,
        css: &css,
    };
    render_gallery(records, &ctx)
}

/// URL of an image relative to the page.
pub fn image_url(path: &str) -> String {
    utf8_percent_encode(path, PATH_SEGMENT).to_string()
}

/// Serialize records for the page script.
///
/// `<` is escaped so a filename can never close the surrounding `<script>`.
fn image_data_json(records: &[ImageRecord]) -> String {
    serde_json::to_string(records)
        .unwrap_or_else(|_| "[]".to_string())
        .replace('<', "\\u003c")
}

/// `"JPG, JPEG, PNG, GIF, SVG, WEBP"`.
fn supported_formats_label() -> String {
    IMAGE_EXTENSIONS
        .iter()
        .map(|ext| ext.to_ascii_uppercase())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, theme: Theme, css: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" class=(theme.as_str()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            (body)
        }
    }
}

/// Renders the sticky header with count and toggles
fn site_header(title: &str, count: usize, options: RenderOptions) -> Markup {
    html! {
        header.site-header {
            div.header-inner {
                div.header-title {
                    h1 { (title) }
                    p.image-count { (count) " images found in current directory" }
                }
                div.header-actions {
                    button #info-toggle .pill-button type="button"
                        aria-pressed=(if options.show_info { "true" } else { "false" }) {
                        span.icon aria-hidden="true" { "ⓘ" }
                        span { "Info" }
                        span #info-state .badge { (if options.show_info { "ON" } else { "OFF" }) }
                    }
                    button #theme-toggle .round-button type="button" aria-label="Toggle theme" {
                        span.icon-moon aria-hidden="true" { "☾" }
                        span.icon-sun aria-hidden="true" { "☀" }
                    }
                    button #refresh-button .round-button type="button" aria-label="Refresh gallery" {
                        span aria-hidden="true" { "⟳" }
                    }
                }
            }
        }
    }
}

/// Renders the placeholder shown when the directory has no images
fn empty_state(directory: &str) -> Markup {
    html! {
        div.empty-state {
            div.empty-icon aria-hidden="true" { "📂" }
            h2 { "No Images Found" }
            p.empty-hint { "Add some images to the current directory." }
            div.empty-details {
                p { "Supported formats: " (supported_formats_label()) }
                p { "Current directory: " code { (directory) } }
                p.note { "Note: Only files in the current directory are scanned (no subdirectories)" }
            }
        }
    }
}

/// Renders one grid card
fn gallery_item(index: usize, record: &ImageRecord) -> Markup {
    html! {
        div.gallery-item {
            div.image-container {
                img.lazy-image
                    src=(LOADING_PLACEHOLDER)
                    data-src=(image_url(&record.path))
                    alt=(record.filename)
                    loading="lazy"
                    data-index=(index);
                div.image-fallback hidden {
                    div {
                        span.icon aria-hidden="true" { "🖼" }
                        p { "Unable to load image" }
                        p.fallback-name { (record.filename) }
                    }
                }
                div.image-info {
                    div.info-row {
                        span.info-name { (record.filename) }
                        span.info-size { (format_file_size(record.size_bytes)) }
                    }
                    @if record.has_dimensions() {
                        div.info-dimensions { (record.width) " × " (record.height) " px" }
                    }
                }
            }
        }
    }
}

/// Renders the masonry grid
fn gallery_grid(records: &[ImageRecord]) -> Markup {
    html! {
        div.masonry-grid {
            @for (index, record) in records.iter().enumerate() {
                (gallery_item(index, record))
            }
        }
    }
}

/// Renders the lightbox; the script fills it in on open
fn image_modal() -> Markup {
    html! {
        div #image-modal .modal-overlay hidden role="dialog" aria-modal="true" {
            div.modal-content {
                button #modal-close .modal-close type="button" aria-label="Close modal" { "×" }
                button #prev-btn .modal-nav .modal-prev type="button" aria-label="Previous image" { "‹" }
                button #next-btn .modal-nav .modal-next type="button" aria-label="Next image" { "›" }
                div.modal-image-container {
                    img #modal-image .modal-image alt="";
                    div #modal-fallback .modal-fallback hidden {
                        div {
                            span.icon aria-hidden="true" { "⚠" }
                            p { "Unable to load image" }
                        }
                    }
                }
                div.modal-info {
                    div #modal-info-filename .modal-filename {}
                    div.modal-meta {
                        div { "Size: " span #modal-info-size {} }
                        div { "Dimensions: " span #modal-info-dimensions {} }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderer
// ============================================================================

/// Renders the gallery page
pub fn render_gallery(records: &[ImageRecord], ctx: &PageContext) -> Markup {
    let body = html! {
        body class=[ctx.options.show_info.then_some("show-info")] {
            (site_header(ctx.title, records.len(), ctx.options))
            main.gallery-main {
                @if records.is_empty() {
                    (empty_state(ctx.directory))
                } @else {
                    (gallery_grid(records))
                }
            }
            (image_modal())
            button.scroll-to-top type="button" aria-label="Scroll to top" { "↑" }
            script #image-data type="application/json" { (PreEscaped(image_data_json(records))) }
            script { (PreEscaped(JS)) }
        }
    };

    base_document(ctx.title, ctx.options.theme, ctx.css, body)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::scan;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn record(name: &str, size: u64, width: u32, height: u32) -> ImageRecord {
        ImageRecord {
            filename: name.to_string(),
            path: name.to_string(),
            size_bytes: size,
            width,
            height,
            modified: at(0),
        }
    }

    fn render(records: &[ImageRecord], options: RenderOptions) -> String {
        let ctx = PageContext {
            title: "Test Gallery",
            directory: "/srv/pictures",
            options,
            css: "body {}",
        };
        render_gallery(records, &ctx).into_string()
    }

    fn sample() -> Vec<ImageRecord> {
        vec![record("b.jpg", 512, 0, 0), record("a.png", 2048, 100, 50)]
    }

    #[test]
    fn document_basics() {
        let html = render(&sample(), RenderOptions::default());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Test Gallery</title>"));
        assert!(html.contains(r#"<html lang="en" class="light">"#));
    }

    #[test]
    fn dark_theme_sets_html_class() {
        let options = RenderOptions {
            theme: Theme::Dark,
            show_info: false,
        };
        let html = render(&sample(), options);
        assert!(html.contains(r#"<html lang="en" class="dark">"#));
    }

    #[test]
    fn header_shows_count() {
        let html = render(&sample(), RenderOptions::default());
        assert!(html.contains("2 images found in current directory"));
    }

    #[test]
    fn grid_items_in_record_order() {
        let html = render(&sample(), RenderOptions::default());
        let b = html.find(r#"data-src="b.jpg""#).unwrap();
        let a = html.find(r#"data-src="a.png""#).unwrap();
        assert!(b < a);
        assert!(html.contains(r#"data-index="0""#));
        assert!(html.contains(r#"data-index="1""#));
        assert!(html.contains(r#"alt="a.png""#));
        assert!(html.contains(r#"loading="lazy""#));
    }

    #[test]
    fn images_start_with_placeholder() {
        let html = render(&sample(), RenderOptions::default());
        assert_eq!(html.matches(r#"src="data:image/svg+xml,"#).count(), 2);
    }

    #[test]
    fn info_overlay_details() {
        let html = render(&sample(), RenderOptions::default());
        assert!(html.contains("2.00 KB"));
        assert!(html.contains("512.00 Bytes"));
        assert!(html.contains("100 × 50 px"));
        // unknown dimensions are not printed as 0 × 0
        assert!(!html.contains("0 × 0 px"));
    }

    #[test]
    fn show_info_toggles_body_class_and_badge() {
        let off = render(&sample(), RenderOptions::default());
        assert!(!off.contains(r#"class="show-info""#));
        assert!(off.contains(">OFF</span>"));

        let on = render(
            &sample(),
            RenderOptions {
                theme: Theme::Light,
                show_info: true,
            },
        );
        assert!(on.contains(r#"<body class="show-info">"#));
        assert!(on.contains(">ON</span>"));
    }

    #[test]
    fn empty_state_when_no_records() {
        let html = render(&[], RenderOptions::default());
        assert!(html.contains("No Images Found"));
        assert!(html.contains("0 images found in current directory"));
        assert!(html.contains("<code>/srv/pictures</code>"));
        assert!(html.contains("JPG, JPEG, PNG, GIF, SVG, WEBP"));
        assert!(!html.contains("masonry-grid"));
    }

    #[test]
    fn modal_and_scroll_button_present() {
        let html = render(&sample(), RenderOptions::default());
        assert!(html.contains(r#"id="image-modal""#));
        assert!(html.contains(r#"id="prev-btn""#));
        assert!(html.contains(r#"id="next-btn""#));
        assert!(html.contains(r#"id="modal-info-dimensions""#));
        assert!(html.contains("scroll-to-top"));
    }

    #[test]
    fn embedded_json_uses_wire_fields() {
        let html = render(&sample(), RenderOptions::default());
        let start = html.find(r#"<script id="image-data" type="application/json">"#).unwrap();
        let json_start = html[start..].find('>').unwrap() + start + 1;
        let json_end = html[json_start..].find("</script>").unwrap() + json_start;
        let data: serde_json::Value = serde_json::from_str(&html[json_start..json_end]).unwrap();

        assert_eq!(data[0]["filename"], "b.jpg");
        assert_eq!(data[0]["filepath"], "b.jpg");
        assert_eq!(data[1]["size"], 2048);
        assert_eq!(data[1]["width"], 100);
        assert_eq!(data[1]["height"], 50);
    }

    #[test]
    fn hostile_filename_is_escaped() {
        let records = vec![record("</script><script>alert(1)</script>.png", 1, 0, 0)];
        let html = render(&records, RenderOptions::default());

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;/script&gt;"));
        assert!(html.contains(r"</script>"));
    }

    #[test]
    fn image_urls_are_percent_encoded() {
        assert_eq!(image_url("a.png"), "a.png");
        assert_eq!(image_url("my photo #1.jpg"), "my%20photo%20%231.jpg");
        assert_eq!(image_url("ünï.svg"), "%C3%BCn%C3%AF.svg");
    }

    #[test]
    fn render_page_injects_config() {
        let mut config = GalleryConfig::default();
        config.title = "Screenshots".to_string();
        config.colors.light.accent = "#ff00ff".to_string();

        let html = render_page(&[], &config, RenderOptions::default(), "/tmp").into_string();
        assert!(html.contains("<title>Screenshots</title>"));
        assert!(html.contains("--color-accent: #ff00ff;"));
        assert!(html.contains(".masonry-grid"));
    }

    // =========================================================================
    // generate()
    // =========================================================================

    #[test]
    fn generate_in_place_writes_index() {
        let tmp = TempDir::new().unwrap();
        write_png(tmp.path(), "a.png", 10, 10);
        let records = scan(tmp.path(), IMAGE_EXTENSIONS);

        let summary = generate(
            tmp.path(),
            tmp.path(),
            &records,
            &GalleryConfig::default(),
            RenderOptions::default(),
        )
        .unwrap();

        assert_eq!(summary.image_count, 1);
        assert_eq!(summary.copied, 0);
        let html = fs::read_to_string(tmp.path().join("index.html")).unwrap();
        assert!(html.contains(r#"data-src="a.png""#));

        // The page never lists itself on a rescan
        let rescanned = scan(tmp.path(), IMAGE_EXTENSIONS);
        assert_eq!(filenames(&rescanned), vec!["a.png"]);
    }

    #[test]
    fn generate_elsewhere_copies_images() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_png(src.path(), "a.png", 10, 10);
        write_file(src.path(), "b.svg", br#"<svg width="1" height="1"/>"#);
        write_file(src.path(), "notes.txt", b"skip me");
        let records = scan(src.path(), IMAGE_EXTENSIONS);
        let dest = out.path().join("site");

        let summary = generate(
            src.path(),
            &dest,
            &records,
            &GalleryConfig::default(),
            RenderOptions::default(),
        )
        .unwrap();

        assert_eq!(summary.copied, 2);
        assert_eq!(summary.page, dest.join("index.html"));
        assert!(dest.join("a.png").is_file());
        assert!(dest.join("b.svg").is_file());
        assert!(!dest.join("notes.txt").exists());
    }
}
