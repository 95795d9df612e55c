//! Directory scanning.
//!
//! Lists one directory (never its subdirectories), keeps the image files,
//! and builds an [`ImageRecord`] for each one, newest first.
//!
//! ## What counts as an image
//!
//! - A regular file (symlinks are followed), not a directory
//! - Whose extension, lowercased, is in the allow-list; the gallery always
//!   uses [`IMAGE_EXTENSIONS`]
//! - That is not the gallery's own entrypoint file type ([`ENTRYPOINT_EXTENSION`]),
//!   so a generated `index.html` never lists itself
//!
//! The extension is whatever follows the last `.` in the name, so a hidden
//! file called `.png` is a PNG.
//!
//! ## Failure policy
//!
//! Scanning never fails. An unreadable directory yields an empty list. An
//! entry whose stats cannot be read is left out. A file whose dimensions
//! cannot be read stays in the list with `0×0` (see [`crate::metadata`]).
//!
//! ## Ordering
//!
//! Newest modification time first. Equal times are ordered by filename so
//! repeated scans of an unchanged directory give identical output.

use crate::imaging::{ImageBackend, RustBackend};
use crate::metadata;
use crate::types::ImageRecord;
use std::fs;
use std::path::Path;

/// File types the gallery displays.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "svg", "webp"];

/// Extension of the page the gallery renders; never listed.
pub const ENTRYPOINT_EXTENSION: &str = "html";

/// Scan `dir` with the production image backend.
pub fn scan(dir: &Path, allowed: &[&str]) -> Vec<ImageRecord> {
    scan_with_backend(&RustBackend::new(), dir, allowed)
}

/// Scan `dir`, reading raster dimensions through `backend`.
pub fn scan_with_backend(
    backend: &impl ImageBackend,
    dir: &Path,
    allowed: &[&str],
) -> Vec<ImageRecord> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(dir = %dir.display(), error = %err, "could not list directory");
            return Vec::new();
        }
    };

    let mut records: Vec<ImageRecord> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!(dir = %dir.display(), error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter_map(|entry| {
            let Ok(name) = entry.file_name().into_string() else {
                tracing::debug!(name = ?entry.file_name(), "skipping non UTF-8 filename");
                return None;
            };
            build_record(backend, &entry.path(), name, allowed)
        })
        .collect();

    records.sort_by(|a, b| {
        b.modified
            .cmp(&a.modified)
            .then_with(|| a.filename.cmp(&b.filename))
    });
    records
}

/// Returns `true` if a bare filename passes the extension filters.
///
/// Says nothing about whether the file exists or is a regular file.
pub fn is_listable_name(name: &str, allowed: &[&str]) -> bool {
    if name == "." || name == ".." {
        return false;
    }
    match file_extension(name) {
        Some(ext) if ext.eq_ignore_ascii_case(ENTRYPOINT_EXTENSION) => false,
        Some(ext) => allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)),
        None => false,
    }
}

/// Text after the last `.`, if any.
pub fn file_extension(name: &str) -> Option<&str> {
    name.rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

fn build_record(
    backend: &impl ImageBackend,
    path: &Path,
    filename: String,
    allowed: &[&str],
) -> Option<ImageRecord> {
    if !is_listable_name(&filename, allowed) {
        return None;
    }

    // Follows symlinks, like a stat of the name would
    let stat = match fs::metadata(path) {
        Ok(stat) => stat,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "skipping: cannot stat");
            return None;
        }
    };
    if !stat.is_file() {
        return None;
    }
    let modified = match stat.modified() {
        Ok(time) => time,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "skipping: no mtime");
            return None;
        }
    };

    let extension = file_extension(&filename).unwrap_or_default().to_ascii_lowercase();
    let dims = metadata::extract_dimensions(backend, path, &extension);

    Some(ImageRecord {
        path: filename.clone(),
        filename,
        size_bytes: stat.len(),
        width: dims.width,
        height: dims.height,
        modified,
    })
}
