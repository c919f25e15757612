//! WCAG 2.x relative luminance and contrast ratio.

use crate::color::Rgb;

/// Minimum contrast for body text under WCAG AA
pub const WCAG_AA_NORMAL_TEXT: f64 = 4.5;

fn linearize(c: f64) -> f64 {
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance in [0, 1], 0 for black and 1 for white.
pub fn relative_luminance(color: Rgb) -> f64 {
    let (r, g, b) = color.to_unit();
    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

/// Contrast ratio in [1, 21]. Argument order does not matter.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Whether `fg` reaches `threshold` against every background.
pub fn meets_all(fg: Rgb, backgrounds: &[Rgb], threshold: f64) -> bool {
    backgrounds
        .iter()
        .all(|bg| contrast_ratio(fg, *bg) >= threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn test_luminance_black_and_white() {
        assert!(approx_eq(relative_luminance(Rgb::BLACK), 0.0, 1e-9));
        assert!(approx_eq(relative_luminance(Rgb::WHITE), 1.0, 1e-9));
    }

    #[test]
    fn test_luminance_pure_green() {
        let lum = relative_luminance(Rgb::new(0, 255, 0));
        assert!(approx_eq(lum, 0.7152, 1e-9));
    }

    #[test]
    fn test_black_on_white_is_21() {
        assert!(approx_eq(contrast_ratio(Rgb::BLACK, Rgb::WHITE), 21.0, 1e-9));
    }

    #[test]
    fn test_contrast_is_symmetric() {
        let a = Rgb::new(255, 255, 0);
        let b = Rgb::new(30, 30, 30);
        assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
    }

    #[test]
    fn test_same_color_is_one() {
        let c = Rgb::new(120, 40, 200);
        assert!(approx_eq(contrast_ratio(c, c), 1.0, 1e-9));
    }

    #[test]
    fn test_meets_all() {
        let backgrounds = [Rgb::WHITE, Rgb::new(240, 240, 240)];
        assert!(meets_all(Rgb::BLACK, &backgrounds, WCAG_AA_NORMAL_TEXT));
        assert!(!meets_all(Rgb::new(255, 255, 0), &backgrounds, WCAG_AA_NORMAL_TEXT));
    }
}
