// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Plain RGB color data.
//!
//! The engine emits colors as bare numbers; whatever material or shader
//! they end up in is the rendering host's business.

use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

use crate::music::pitch::TONES;

/// An RGB color with f32 channels.
///
/// Channels are nominally `[0, 1]` but intensified colors may exceed 1;
/// the host decides whether to tone-map or clip.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Convert from HSV (hue in degrees, saturation and value in [0, 1])
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = value * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = value - c;
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        Self::new(r + m, g + m, b + m)
    }

    /// Linear interpolation toward another color
    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    /// All channels finite (guards the blend math against NaN leaks)
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, rhs: f32) -> Color {
        Color::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

/// The twelve base colors, indexed by circle-of-fifths distance from the
/// current key: a full trip around the hue wheel, so harmonically close
/// keys get close hues.
pub fn fifths_palette() -> [Color; TONES] {
    let mut palette = [Color::BLACK; TONES];
    for (i, entry) in palette.iter_mut().enumerate() {
        *entry = Color::from_hsv(i as f32 * 360.0 / TONES as f32, 0.85, 1.0);
    }
    palette
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsv_primaries() {
        let red = Color::from_hsv(0.0, 1.0, 1.0);
        assert!((red.r - 1.0).abs() < 1e-6 && red.g.abs() < 1e-6 && red.b.abs() < 1e-6);

        let green = Color::from_hsv(120.0, 1.0, 1.0);
        assert!(green.g > 0.99 && green.r < 1e-6);

        let blue = Color::from_hsv(240.0, 1.0, 1.0);
        assert!(blue.b > 0.99 && blue.r < 1e-6);
    }

    #[test]
    fn test_hsv_wraps_hue() {
        let a = Color::from_hsv(30.0, 0.85, 1.0);
        let b = Color::from_hsv(390.0, 0.85, 1.0);
        assert!((a.r - b.r).abs() < 1e-5);
        assert!((a.g - b.g).abs() < 1e-5);
        assert!((a.b - b.b).abs() < 1e-5);
    }

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        let c = Color::BLACK.lerp(Color::WHITE, 0.5);
        assert!((c.r - 0.5).abs() < 1e-6);
        assert_eq!(Color::BLACK.lerp(Color::WHITE, 0.0), Color::BLACK);
        assert_eq!(Color::BLACK.lerp(Color::WHITE, 1.0), Color::WHITE);
    }

    #[test]
    fn test_palette_distinct() {
        let palette = fifths_palette();
        for i in 0..palette.len() {
            for j in (i + 1)..palette.len() {
                let a = palette[i];
                let b = palette[j];
                let dist = (a.r - b.r).abs() + (a.g - b.g).abs() + (a.b - b.b).abs();
                assert!(dist > 0.05, "palette entries {} and {} too close", i, j);
            }
        }
    }

    #[test]
    fn test_palette_finite_and_in_range() {
        for color in fifths_palette() {
            assert!(color.is_finite());
            for ch in [color.r, color.g, color.b] {
                assert!((0.0..=1.0).contains(&ch));
            }
        }
    }
}
