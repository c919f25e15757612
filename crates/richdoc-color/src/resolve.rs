//! Accessible color resolution against the light and dark reading themes.
//!
//! A color picked for a text or highlight mark has to stay legible on both
//! theme backgrounds. Colors that already pass are kept as authored. Others
//! keep their hue and saturation while the HSL lightness is walked upward and
//! downward in fixed steps; the compliant candidate closest to the original
//! lightness wins. When no lightness works the authored color is kept.

use tracing::debug;

use crate::color::{Hsl, Rgb};
use crate::contrast::{meets_all, WCAG_AA_NORMAL_TEXT};
use crate::Result;

/// Theme backgrounds and the contrast policy applied to them
#[derive(Debug, Clone)]
pub struct Palette {
    /// Page background of the dark theme
    pub dark_background: String,

    /// Page background of the light theme
    pub light_background: String,

    /// Minimum contrast ratio required against each background
    pub threshold: f64,

    /// Lightness increment used by the search
    pub step: f64,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            dark_background: "#1e1e1e".to_string(),
            light_background: "#FAF9F6".to_string(),
            threshold: WCAG_AA_NORMAL_TEXT,
            step: 0.01,
        }
    }
}

/// Outcome of checking a color against the palette
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    /// Already legible on both backgrounds
    Compliant,
    /// Replaced by a lightness-shifted variant
    Adjusted { color: Rgb, delta: f64 },
    /// No lightness of this hue and saturation is legible on both backgrounds
    Unresolvable,
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Lighter,
    Darker,
}

/// Resolves authored colors into colors legible on both theme backgrounds
#[derive(Debug, Clone)]
pub struct ColorResolver {
    backgrounds: [Rgb; 2],
    threshold: f64,
    step: f64,
}

impl ColorResolver {
    /// Create a resolver for the default reading themes
    pub fn new() -> Self {
        Self {
            backgrounds: [Rgb::new(0x1e, 0x1e, 0x1e), Rgb::new(0xfa, 0xf9, 0xf6)],
            threshold: WCAG_AA_NORMAL_TEXT,
            step: 0.01,
        }
    }

    /// Create a resolver from a custom palette
    pub fn with_palette(palette: &Palette) -> Result<Self> {
        Ok(Self {
            backgrounds: [
                Rgb::from_hex(&palette.dark_background)?,
                Rgb::from_hex(&palette.light_background)?,
            ],
            threshold: palette.threshold,
            step: if palette.step > 0.0 { palette.step } else { 0.01 },
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn backgrounds(&self) -> &[Rgb; 2] {
        &self.backgrounds
    }

    /// Whether a color is legible on both backgrounds
    pub fn is_compliant(&self, color: Rgb) -> bool {
        meets_all(color, &self.backgrounds, self.threshold)
    }

    /// Resolve a hex color.
    ///
    /// Returns `hex` untouched when it is already compliant, cannot be parsed,
    /// or cannot be made compliant. Otherwise returns the adjusted color as
    /// lowercase `#rrggbb`.
    pub fn resolve(&self, hex: &str) -> String {
        let color = match Rgb::from_hex(hex) {
            Ok(color) => color,
            Err(err) => {
                debug!(%err, "keeping unparseable color");
                return hex.to_string();
            }
        };

        match self.adjust(color) {
            Adjustment::Adjusted { color, .. } => color.to_hex(),
            Adjustment::Compliant | Adjustment::Unresolvable => hex.to_string(),
        }
    }

    /// Check a color and search for a compliant lightness if needed.
    pub fn adjust(&self, color: Rgb) -> Adjustment {
        if self.is_compliant(color) {
            return Adjustment::Compliant;
        }

        let hsl = color.to_hsl();
        let lighter = self.search(hsl, Direction::Lighter);
        let darker = self.search(hsl, Direction::Darker);

        let chosen = match (lighter, darker) {
            (Some(up), Some(down)) => Some(if up.1 <= down.1 { up } else { down }),
            (Some(up), None) => Some(up),
            (None, Some(down)) => Some(down),
            (None, None) => None,
        };

        match chosen {
            Some((adjusted, delta)) => {
                debug!(
                    from = %color.to_hex(),
                    to = %adjusted.to_hex(),
                    delta,
                    "adjusted color for contrast"
                );
                Adjustment::Adjusted {
                    color: adjusted,
                    delta,
                }
            }
            None => {
                debug!(color = %color.to_hex(), "no compliant lightness found");
                Adjustment::Unresolvable
            }
        }
    }

    /// Walk lightness one step at a time toward 1.0 or 0.0 and return the
    /// first compliant color with its lightness delta. The end of the range is
    /// always tested.
    fn search(&self, hsl: Hsl, direction: Direction) -> Option<(Rgb, f64)> {
        let (target, sign) = match direction {
            Direction::Lighter => (1.0, 1.0),
            Direction::Darker => (0.0, -1.0),
        };

        let distance = (target - hsl.l).abs();
        let steps = (distance / self.step).ceil() as usize;

        (1..=steps).find_map(|i| {
            let l = if i == steps {
                target
            } else {
                hsl.l + sign * self.step * i as f64
            };
            let candidate = hsl.with_lightness(l).to_rgb();
            self.is_compliant(candidate)
                .then(|| (candidate, (l - hsl.l).abs()))
        })
    }
}

impl Default for ColorResolver {
    fn default() -> Self {
        Self::new()
    }
}
