//! Image backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the seam between the scanner and the
//! raster decoders. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend); tests swap in
//! [`tests::MockBackend`] to exercise scan logic without real images.

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not read dimensions: {0}")]
    Undecodable(String),
}

/// Intrinsic pixel size. `Default` is `0×0`, meaning "unknown".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const UNKNOWN: Dimensions = Dimensions {
        width: 0,
        height: 0,
    };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Reads intrinsic dimensions from an image file.
pub trait ImageBackend: Sync {
    /// Get image dimensions from the file header.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;
}
