//! # Instant Gallery
//!
//! Point it at a directory and get a browsable image gallery. The directory
//! is the only data source: every image file directly inside it becomes a
//! card in a masonry grid, newest first. Nothing is cached and nothing is
//! written back to the directory unless you ask for a static build.
//!
//! # Architecture
//!
//! ```text
//! scan      dir      →  Vec<ImageRecord>   (filter, stat, read dimensions, sort)
//! generate  records  →  HTML               (maud page, embedded JSON, lightbox)
//! serve     request  →  scan + generate    (one fresh scan per request)
//! ```
//!
//! The scanner never fails: an unreadable directory is an empty gallery and
//! an undecodable image is listed with `0×0` dimensions. Errors only surface
//! from the outer layers (config loading, writing files, binding a socket).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Lists one directory, filters by extension, orders newest first |
//! | [`metadata`] | Dimension extraction: SVG attributes or raster header probe, `0×0` on failure |
//! | [`imaging`] | Raster backend (`image` crate header probe) and SVG attribute parsing |
//! | [`generate`] | Renders the gallery page with Maud; static `index.html` builds |
//! | [`serve`] | axum HTTP server: page, JSON API, raw image bytes |
//! | [`config`] | `gallery.toml` loading, merging with stock defaults, color CSS |
//! | [`types`] | `ImageRecord` and the presentation toggles |
//! | [`output`] | CLI output formatting and human-readable file sizes |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## Header Probes, Not Decodes
//!
//! Dimensions come from [`image::ImageReader::into_dimensions`], which reads
//! only the file header. A directory of large photos scans in milliseconds
//! and a truncated file still reports its size even if the pixels are gone.
//!
//! ## Presentation Is Per Request
//!
//! Theme and info-overlay state travel as an explicit
//! [`types::RenderOptions`] value into the renderer. The server resolves
//! them from the query string, a cookie, and the config default; the static
//! build takes them from CLI flags.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): malformed markup
//! is a build error and every interpolation is escaped, which matters here
//! because filenames are arbitrary user input.

pub mod config;
pub mod generate;
pub mod imaging;
pub mod logging;
pub mod metadata;
pub mod output;
pub mod scan;
pub mod serve;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
