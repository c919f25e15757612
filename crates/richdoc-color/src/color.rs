//! Hex, RGB and HSL color representations.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{ColorError, Result};

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap());

/// An 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or the `#rgb` shorthand. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        let captures = HEX_COLOR
            .captures(hex)
            .ok_or_else(|| ColorError::InvalidHex(hex.to_string()))?;
        let digits = &captures[1];

        let expanded: String = if digits.len() == 3 {
            digits.chars().flat_map(|c| [c, c]).collect()
        } else {
            digits.to_string()
        };

        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map_err(|_| ColorError::InvalidHex(hex.to_string()))
        };

        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels normalized to [0, 1]
    pub fn to_unit(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    pub fn to_hsl(self) -> Hsl {
        let (r, g, b) = self.to_unit();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl {
            h: h * 60.0,
            s,
            l,
        }
    }
}

/// Hue in degrees [0, 360), saturation and lightness in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub fn with_lightness(self, l: f64) -> Self {
        Self {
            l: l.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn to_rgb(self) -> Rgb {
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);

        if s == 0.0 {
            let v = to_channel(l);
            return Rgb::new(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let h = self.h.rem_euclid(360.0) / 360.0;

        Rgb::new(
            to_channel(hue_to_channel(p, q, h + 1.0 / 3.0)),
            to_channel(hue_to_channel(p, q, h)),
            to_channel(hue_to_channel(p, q, h - 1.0 / 3.0)),
        )
    }
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_hex() {
        assert_eq!(Rgb::from_hex("#1e1e1e").unwrap(), Rgb::new(30, 30, 30));
        assert_eq!(Rgb::from_hex("FAF9F6").unwrap(), Rgb::new(250, 249, 246));
    }

    #[test]
    fn test_parse_short_hex() {
        assert_eq!(Rgb::from_hex("#f0a").unwrap(), Rgb::new(255, 0, 170));
    }

    #[test]
    fn test_invalid_hex() {
        assert!(Rgb::from_hex("#12345").is_err());
        assert!(Rgb::from_hex("red").is_err());
        assert!(Rgb::from_hex("").is_err());
    }

    #[test]
    fn test_to_hex_is_lowercase() {
        assert_eq!(Rgb::new(255, 255, 0).to_hex(), "#ffff00");
    }

    #[test]
    fn test_hsl_of_primaries() {
        let red = Rgb::new(255, 0, 0).to_hsl();
        assert_eq!(red.h, 0.0);
        assert_eq!(red.s, 1.0);
        assert_eq!(red.l, 0.5);

        let yellow = Rgb::new(255, 255, 0).to_hsl();
        assert!((yellow.h - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_gray_has_no_saturation() {
        let gray = Rgb::new(128, 128, 128).to_hsl();
        assert_eq!(gray.s, 0.0);
        assert_eq!(gray.to_rgb(), Rgb::new(128, 128, 128));
    }

    #[test]
    fn test_hsl_round_trip_preserves_color() {
        for color in [
            Rgb::new(255, 255, 0),
            Rgb::new(18, 52, 86),
            Rgb::new(200, 30, 150),
        ] {
            assert_eq!(color.to_hsl().to_rgb(), color);
        }
    }

    #[test]
    fn test_lightness_extremes() {
        let hsl = Rgb::new(255, 255, 0).to_hsl();
        assert_eq!(hsl.with_lightness(1.0).to_rgb(), Rgb::WHITE);
        assert_eq!(hsl.with_lightness(0.0).to_rgb(), Rgb::BLACK);
    }
}
