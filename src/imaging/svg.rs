//! SVG size detection.
//!
//! SVG has no raster header, so the size comes from attributes on the root
//! `<svg>` start tag, in priority order:
//!
//! 1. `width` + `height`, both starting with a number. Units and decimals
//!    are truncated: `width="120px"` → 120, `height="80.9"` → 80.
//! 2. `viewBox="minX minY width height"`, separated by commas and/or
//!    whitespace; the last two numbers are the size.
//!
//! A `width`/`height` pair with a non-numeric side (`auto`) is ignored on
//! purpose rather than coerced to 0, so the `viewBox` size is used instead.
//!
//! Everything here is a pure function over text except
//! [`read_svg_dimensions`], which loads the file.

use super::backend::{BackendError, Dimensions};
use std::path::Path;

/// Read an SVG file and parse its size.
///
/// Returns `Ok(None)` when the markup carries no usable size. Invalid
/// UTF-8 is replaced rather than rejected; only I/O failures are errors.
pub fn read_svg_dimensions(path: &Path) -> Result<Option<Dimensions>, BackendError> {
    let bytes = std::fs::read(path)?;
    Ok(parse_svg_dimensions(&String::from_utf8_lossy(&bytes)))
}

/// Parse the size of an SVG document from its markup.
pub fn parse_svg_dimensions(markup: &str) -> Option<Dimensions> {
    let tag = svg_root_tag(markup)?;
    let attrs = parse_attributes(tag);
    explicit_size(&attrs).or_else(|| {
        attribute(&attrs, "viewBox").and_then(view_box_size)
    })
}

/// `width` and `height` attributes, when both start with a number.
pub fn explicit_size(attrs: &[(&str, &str)]) -> Option<Dimensions> {
    let width = leading_pixels(attribute(attrs, "width")?)?;
    let height = leading_pixels(attribute(attrs, "height")?)?;
    Some(Dimensions { width, height })
}

/// Width and height from a `viewBox` value.
///
/// Requires exactly four finite numbers; negative sizes are rejected.
pub fn view_box_size(value: &str) -> Option<Dimensions> {
    let numbers: Vec<f64> = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<f64>().ok().filter(|n| n.is_finite()))
        .collect::<Option<_>>()?;

    let [_, _, width, height] = numbers[..] else {
        return None;
    };
    if width < 0.0 || height < 0.0 {
        return None;
    }
    // `as` saturates out-of-range floats
    Some(Dimensions {
        width: width.trunc() as u32,
        height: height.trunc() as u32,
    })
}

/// Integer prefix of an attribute value, ignoring leading whitespace.
///
/// `"120px"` → 120, `" 80.9"` → 80, `"+5"` → 5. A negative prefix clamps
/// to 0 and absurdly long digit runs saturate. `None` when the value does
/// not start with a number (`"auto"`, `""`).
fn leading_pixels(value: &str) -> Option<u32> {
    let value = value.trim_start();
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    if negative {
        return Some(0);
    }
    Some(
        digits[..end]
            .bytes()
            .fold(0u32, |acc, d| {
                acc.saturating_mul(10).saturating_add(u32::from(d - b'0'))
            }),
    )
}

/// Case-insensitive attribute lookup.
fn attribute<'a>(attrs: &[(&str, &'a str)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| *value)
}

/// Text following the first `<svg` start tag name, up to the end of input.
///
/// The attribute parser stops at the closing `>`, so a truncated document
/// still yields whatever attributes were written completely.
fn svg_root_tag(markup: &str) -> Option<&str> {
    let mut offset = 0;
    while let Some(found) = find_ignore_ascii_case(&markup[offset..], "<svg") {
        let after = offset + found + "<svg".len();
        match markup[after..].bytes().next() {
            Some(b) if b.is_ascii_whitespace() || b == b'>' || b == b'/' => {
                return Some(&markup[after..]);
            }
            // `<svgfoo` or similar: keep looking
            Some(_) => offset = after,
            None => return None,
        }
    }
    None
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

/// Parse `name="value"`, `name='value'`, `name=value` and bare `name`
/// attributes until the tag's closing `>`.
///
/// An attribute whose quoted value is never closed is dropped.
fn parse_attributes(tag: &str) -> Vec<(&str, &str)> {
    let bytes = tag.as_bytes();
    let len = bytes.len();
    let mut attrs = Vec::new();
    let mut i = 0;

    while i < len {
        while i < len && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= len || bytes[i] == b'>' {
            break;
        }

        let name_start = i;
        while i < len && !bytes[i].is_ascii_whitespace() && !matches!(bytes[i], b'=' | b'>' | b'/')
        {
            i += 1;
        }
        if i == name_start {
            // stray `=`
            i += 1;
            continue;
        }
        let name = &tag[name_start..i];

        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= len || bytes[i] != b'=' {
            attrs.push((name, ""));
            continue;
        }
        i += 1;
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        match bytes.get(i) {
            Some(&quote) if quote == b'"' || quote == b'\'' => {
                let value_start = i + 1;
                let Some(close) = bytes[value_start..].iter().position(|&b| b == quote) else {
                    break;
                };
                attrs.push((name, &tag[value_start..value_start + close]));
                i = value_start + close + 1;
            }
            _ => {
                let value_start = i;
                while i < len && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                    i += 1;
                }
                attrs.push((name, &tag[value_start..i]));
            }
        }
    }

    attrs
}
