//! CLI output formatting.
//!
//! Output is information-first: each image leads with its position in the
//! gallery (newest first) and its filename, with size and dimensions as
//! indented context lines.
//!
//! ## Scan
//!
//! ```text
//! Images in ./screenshots (2)
//! 001 b.jpg
//!     Size: 2.00 KB
//!     Dimensions: unknown
//! 002 a.png
//!     Size: 2.00 KB
//!     Dimensions: 100 × 50 px
//! ```
//!
//! ## Build
//!
//! ```text
//! index.html → dist/index.html (2 images)
//! Copied 2 images
//! ```
//!
//! Each `format_*` function returns `Vec<String>` for testability; the
//! matching `print_*` wrapper writes to stdout. Format functions are pure.

use crate::generate::GenerateSummary;
use crate::types::ImageRecord;
use std::path::Path;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human-readable byte count, 1024-based, two decimals.
///
/// `0` → `"0 Bytes"`, `512` → `"512.00 Bytes"`, `2048` → `"2.00 KB"`.
/// Units stop at GB; larger sizes are shown as thousands of GB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0;
    let mut threshold = 1024u64;
    while unit < SIZE_UNITS.len() - 1 && bytes >= threshold {
        unit += 1;
        threshold = threshold.saturating_mul(1024);
    }
    // Half away from zero, so 1.125 KB reads "1.13 KB" as in the page script
    let scaled = (bytes as f64 / 1024f64.powi(unit as i32) * 100.0).round() / 100.0;
    format!("{} {}", group_thousands(&format!("{scaled:.2}")), SIZE_UNITS[unit])
}

/// Insert `,` separators into the integer part of a decimal string.
fn group_thousands(number: &str) -> String {
    let (int_part, frac_part) = number.split_once('.').unwrap_or((number, ""));
    let mut grouped = String::with_capacity(number.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if !frac_part.is_empty() {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

/// `"100 × 50 px"`, or `"unknown"` when either side is zero.
pub fn format_dimensions(record: &ImageRecord) -> String {
    if record.has_dimensions() {
        format!("{} × {} px", record.width, record.height)
    } else {
        "unknown".to_string()
    }
}

fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

// ============================================================================
// Scan
// ============================================================================

/// Format the scan inventory.
pub fn format_scan_output(records: &[ImageRecord], source: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "Images in {} ({})",
        source.display(),
        records.len()
    )];

    if records.is_empty() {
        lines.push("    No images found".to_string());
        return lines;
    }

    for (i, record) in records.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), record.filename));
        lines.push(format!("    Size: {}", format_file_size(record.size_bytes)));
        lines.push(format!("    Dimensions: {}", format_dimensions(record)));
    }
    lines
}

pub fn print_scan_output(records: &[ImageRecord], source: &Path) {
    for line in format_scan_output(records, source) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Format the result of writing a static gallery page.
pub fn format_generate_output(summary: &GenerateSummary) -> Vec<String> {
    let mut lines = vec![format!(
        "index.html → {} ({} images)",
        summary.page.display(),
        summary.image_count
    )];
    if summary.copied > 0 {
        lines.push(format!("Copied {} images", summary.copied));
    }
    lines
}

pub fn print_generate_output(summary: &GenerateSummary) {
    for line in format_generate_output(summary) {
        println!("{}", line);
    }
}
