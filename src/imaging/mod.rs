//! Intrinsic image dimensions, pure Rust.
//!
//! | Format | How |
//! |---|---|
//! | JPEG, PNG, GIF, WebP | `image` crate header probe (`ImageReader::into_dimensions`) |
//! | SVG | root `<svg>` attributes: `width`/`height`, else `viewBox` |
//!
//! The module is split into:
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`] for raster formats
//! - **SVG**: text parsing functions returning typed optional sizes

pub mod backend;
pub mod rust_backend;
pub mod svg;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use rust_backend::RustBackend;
