//! Stroke colors.
//!
//! Rainbow mode strokes every joined path in its own color. Colors are
//! picked in HLS space from coarse bands, so they stay saturated and never
//! wash out to white or sink to black.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// An RGB color with each channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Rgb = Rgb { r: 1.0, g: 1.0, b: 1.0 };

    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to bytes, clamped.
    pub fn to_u8(self) -> [u8; 3] {
        let byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [byte(self.r), byte(self.g), byte(self.b)]
    }

    /// `#rrggbb`, for SVG attributes.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_u8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// Convert hue, lightness, saturation (all in `[0, 1]`) to RGB.
pub fn hls_to_rgb(h: f64, l: f64, s: f64) -> Rgb {
    if s == 0.0 {
        return Rgb::new(l, l, l);
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    Rgb::new(
        hue_channel(m1, m2, h + 1.0 / 3.0),
        hue_channel(m1, m2, h),
        hue_channel(m1, m2, h - 1.0 / 3.0),
    )
}

fn hue_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

/// Number of distinct hues rainbow mode picks from.
pub const HUES: u32 = 36;

/// A random color: one of [`HUES`] hues, lightness 0.3-0.8, saturation
/// 0.6-1.0, both in steps of 0.1.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    let hue = rng.random_range(0..HUES) as f64 / HUES as f64;
    let lightness = rng.random_range(3..9) as f64 / 10.0;
    let saturation = rng.random_range(6..11) as f64 / 10.0;
    hls_to_rgb(hue, lightness, saturation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn assert_rgb(actual: Rgb, r: f64, g: f64, b: f64) {
        let close = |a: f64, e: f64| (a - e).abs() < 1e-9;
        assert!(close(actual.r, r) && close(actual.g, g) && close(actual.b, b), "got {:?}", actual);
    }

    #[test]
    fn primaries() {
        assert_rgb(hls_to_rgb(0.0, 0.5, 1.0), 1.0, 0.0, 0.0);
        assert_rgb(hls_to_rgb(1.0 / 3.0, 0.5, 1.0), 0.0, 1.0, 0.0);
        assert_rgb(hls_to_rgb(2.0 / 3.0, 0.5, 1.0), 0.0, 0.0, 1.0);
    }

    #[test]
    fn no_saturation_is_grey() {
        assert_rgb(hls_to_rgb(0.7, 0.25, 0.0), 0.25, 0.25, 0.25);
    }

    #[test]
    fn light_pastel() {
        // Lightness above one half takes the other branch.
        assert_rgb(hls_to_rgb(0.0, 0.75, 0.5), 0.875, 0.625, 0.625);
    }

    #[test]
    fn random_colors_are_deterministic_and_in_range() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..500 {
            let ca = random_color(&mut a);
            assert_eq!(ca, random_color(&mut b));
            for c in [ca.r, ca.g, ca.b] {
                assert!((0.0..=1.0).contains(&c), "{:?}", ca);
            }
        }
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(Rgb::BLACK.to_hex(), "#000000");
        assert_eq!(Rgb::new(1.0, 0.5, 0.0).to_hex(), "#ff8000");
    }
}
