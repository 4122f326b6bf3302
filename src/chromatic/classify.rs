//! Human readable color names from a fixed hue/saturation/value partition.
//!
//! The hue bands below are a literal table: they leave one-degree gaps between
//! neighbours and nothing covers 330..355. Hues that fall into a gap are
//! `"unknown"`.

use crate::{chromatic::metrics::metrics, types::Rgb};

pub const BLACK: &str = "black";
pub const WHITE_GRAY: &str = "white/gray";
pub const UNKNOWN: &str = "unknown";

/// Below this brightness a color is black, whatever its hue.
pub const BLACK_VALUE_THRESHOLD: f64 = 0.1;
/// Below this saturation a color is white or gray.
pub const GRAY_SATURATION_THRESHOLD: f64 = 0.1;

/// A half-open hue interval `[lo, hi)` in degrees.
///
/// A band with `lo > hi` wraps through 0°: it covers `[lo, 360) ∪ [0, hi)`.
#[derive(Debug, Clone, Copy)]
pub struct HueBand {
    pub lo: f64,
    pub hi: f64,
    pub name: &'static str,
}

impl HueBand {
    pub fn contains(&self, degrees: f64) -> bool {
        if self.lo <= self.hi {
            self.lo <= degrees && degrees < self.hi
        } else {
            degrees >= self.lo || degrees < self.hi
        }
    }
}

const fn band(lo: f64, hi: f64, name: &'static str) -> HueBand {
    HueBand { lo, hi, name }
}

/// Evaluated in order; the first matching band wins.
pub const HUE_BANDS: [HueBand; 14] = [
    band(355.0, 10.0, "red"),
    band(11.0, 20.0, "red-orange"),
    band(21.0, 40.0, "orange/brown"),
    band(41.0, 50.0, "orange-yellow"),
    band(51.0, 60.0, "yellow"),
    band(61.0, 80.0, "yellow-green"),
    band(81.0, 140.0, "green"),
    band(141.0, 169.0, "green-cyan"),
    band(170.0, 200.0, "cyan"),
    band(201.0, 220.0, "cyan-blue"),
    band(221.0, 240.0, "blue"),
    band(241.0, 280.0, "blue-magenta"),
    band(281.0, 320.0, "magenta"),
    band(321.0, 330.0, "magenta-pink"),
];

/// Names the hue band a degree value falls into, or `"unknown"`.
pub fn hue_band_name(degrees: f64) -> &'static str {
    HUE_BANDS
        .iter()
        .find(|b| b.contains(degrees))
        .map(|b| b.name)
        .unwrap_or(UNKNOWN)
}

/// Classifies an RGB triple. Total over the RGB cube.
pub fn classify(rgb: Rgb) -> &'static str {
    let hsv = metrics(rgb);

    if hsv.brightness < BLACK_VALUE_THRESHOLD {
        BLACK
    } else if hsv.saturation < GRAY_SATURATION_THRESHOLD {
        WHITE_GRAY
    } else {
        hue_band_name(hsv.hue_degrees())
    }
}

/// Classifies every palette entry, keeping order and length.
pub fn classify_palette(palette: &[Rgb]) -> Vec<String> {
    palette.iter().map(|c| classify(*c).to_string()).collect()
}
