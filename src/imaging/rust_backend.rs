//! Pure Rust raster backend built on the `image` crate.
//!
//! Only the header is read: `ImageReader::into_dimensions` stops once the
//! decoder knows the frame size, so large photos are cheap to identify.
//! The format is sniffed from the file's magic bytes first and falls back
//! to the extension, so a PNG saved as `.jpg` still reports its size.

use super::backend::{BackendError, Dimensions, ImageBackend};
use image::ImageReader;
use std::path::Path;

/// Raster extensions with a decoder compiled in (see the `image` features
/// in `Cargo.toml`). SVG is handled by [`super::svg`] instead.
const RASTER_FORMATS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Returns `true` if `ext` (any case) names a raster format this backend reads.
pub fn is_raster_extension(ext: &str) -> bool {
    RASTER_FORMATS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(ext))
}

/// Header-only backend using the `image` crate.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let reader = ImageReader::open(path)?.with_guessed_format()?;
        let (width, height) = reader.into_dimensions().map_err(|e| {
            BackendError::Undecodable(format!("{}: {}", path.display(), e))
        })?;
        Ok(Dimensions { width, height })
    }
}
