//! richdoc-color - accessible colors for text marks
//!
//! Authors pick arbitrary foreground and highlight colors, but documents are
//! read on both a dark and a light theme. This crate checks a color against
//! both theme backgrounds using the WCAG contrast ratio and, when needed,
//! shifts its lightness until it is legible on both.
//!
//! # Example
//!
//! ```rust
//! use richdoc_color::{ColorResolver, Palette};
//!
//! let resolver = ColorResolver::with_palette(&Palette {
//!     threshold: 3.0,
//!     ..Palette::default()
//! })
//! .unwrap();
//!
//! let color = resolver.resolve("#FFFF00");
//! assert_ne!(color, "#FFFF00");
//! ```

mod color;
mod contrast;
mod resolve;

pub use color::{Hsl, Rgb};
pub use contrast::{contrast_ratio, meets_all, relative_luminance, WCAG_AA_NORMAL_TEXT};
pub use resolve::{Adjustment, ColorResolver, Palette};

/// Error type for color operations
#[derive(Debug, thiserror::Error)]
pub enum ColorError {
    #[error("Invalid hex color: {0}")]
    InvalidHex(String),
}

pub type Result<T> = std::result::Result<T, ColorError>;
