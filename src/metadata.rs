//! Per-file dimension extraction.
//!
//! [`extract_dimensions`] is total: it never returns an error and never
//! panics on bad input. Anything that goes wrong (missing file, zero-byte
//! file, corrupt header, SVG without size attributes) yields `0×0`, which
//! the renderer shows as "Unknown". A record with unknown dimensions is
//! still a valid record; its byte size comes from the scanner's stat call
//! and does not depend on anything here.
//!
//! ## Dispatch
//!
//! | Extension | Source |
//! |---|---|
//! | `svg` | [`imaging::svg`] attribute parsing |
//! | `jpg`, `jpeg`, `png`, `gif`, `webp` | [`ImageBackend::identify`] (header only) |
//! | anything else | `0×0` |

use crate::imaging::rust_backend::is_raster_extension;
use crate::imaging::{Dimensions, ImageBackend, svg};
use std::path::Path;

/// Determine the pixel size of `path`, treating it as `extension`.
///
/// `extension` is matched case-insensitively and without the dot.
pub fn extract_dimensions(
    backend: &impl ImageBackend,
    path: &Path,
    extension: &str,
) -> Dimensions {
    if extension.eq_ignore_ascii_case("svg") {
        return match svg::read_svg_dimensions(path) {
            Ok(Some(dims)) => dims,
            Ok(None) => {
                tracing::debug!(path = %path.display(), "svg has no usable size attributes");
                Dimensions::UNKNOWN
            }
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "could not read svg");
                Dimensions::UNKNOWN
            }
        };
    }

    if !is_raster_extension(extension) {
        return Dimensions::UNKNOWN;
    }

    backend.identify(path).unwrap_or_else(|err| {
        tracing::debug!(path = %path.display(), error = %err, "could not get dimensions");
        Dimensions::UNKNOWN
    })
}
