//! Attribute values taken from authored documents.
//!
//! Only URLs with a web or mail scheme (or no scheme, i.e. relative) and
//! plain hex colors are written into the element tree.

use once_cell::sync::Lazy;
use regex::Regex;
use richdoc_color::Rgb;
use tracing::debug;

const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

static URL_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):").unwrap());

/// The trimmed URL if it is relative or uses an allowed scheme
pub(crate) fn safe_url(url: &str) -> Option<&str> {
    let url = url.trim();
    // Browsers skip whitespace and control characters inside a scheme
    let compact: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();
    if compact.is_empty() {
        return None;
    }

    match URL_SCHEME.captures(&compact) {
        Some(caps) if !ALLOWED_SCHEMES.contains(&caps[1].to_ascii_lowercase().as_str()) => {
            debug!(scheme = %&caps[1], "dropping URL with disallowed scheme");
            None
        }
        _ => Some(url),
    }
}

/// Normalized `#rrggbb` if the value is a hex color
pub(crate) fn safe_color(color: &str) -> Option<String> {
    match Rgb::from_hex(color) {
        Ok(rgb) => Some(rgb.to_hex()),
        Err(err) => {
            debug!(%err, "dropping non-hex color");
            None
        }
    }
}
