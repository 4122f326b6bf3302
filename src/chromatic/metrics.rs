//! HSV decomposition of an RGB triple.

use crate::types::Rgb;

/// Hue, saturation and brightness of a color, each in `[0, 1]` (hue in `[0, 1)`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
}

impl Hsv {
    /// Hue expressed in degrees, `[0, 360)`.
    pub fn hue_degrees(&self) -> f64 {
        self.hue * 360.0
    }
}

/// Classic six-sector RGB -> HSV conversion on channels normalized to `[0, 1]`.
///
/// Grays (max == min) have hue 0 and saturation 0; black additionally has
/// brightness 0.
pub fn metrics(rgb: Rgb) -> Hsv {
    let r = rgb.0 as f64 / 255.0;
    let g = rgb.1 as f64 / 255.0;
    let b = rgb.2 as f64 / 255.0;

    let maxc = r.max(g).max(b);
    let minc = r.min(g).min(b);
    let brightness = maxc;

    if minc == maxc {
        return Hsv {
            hue: 0.0,
            saturation: 0.0,
            brightness,
        };
    }

    let rangec = maxc - minc;
    let saturation = rangec / maxc;

    let rc = (maxc - r) / rangec;
    let gc = (maxc - g) / rangec;
    let bc = (maxc - b) / rangec;

    let h = if r == maxc {
        bc - gc
    } else if g == maxc {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };

    let mut hue = (h / 6.0).rem_euclid(1.0);
    if hue >= 1.0 {
        hue = 0.0;
    }

    Hsv {
        hue,
        saturation,
        brightness,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_primaries() {
        let red = metrics(Rgb(255, 0, 0));
        assert_eq!(red.hue, 0.0);
        assert_eq!(red.saturation, 1.0);
        assert_eq!(red.brightness, 1.0);

        let green = metrics(Rgb(0, 255, 0));
        assert!((green.hue - 1.0 / 3.0).abs() < EPS);

        let blue = metrics(Rgb(0, 0, 255));
        assert!((blue.hue - 2.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn test_grays_have_no_hue_or_saturation() {
        for v in [0u8, 1, 64, 128, 254, 255] {
            let hsv = metrics(Rgb(v, v, v));
            assert_eq!(hsv.hue, 0.0);
            assert_eq!(hsv.saturation, 0.0);
            assert!((hsv.brightness - v as f64 / 255.0).abs() < EPS);
        }
    }

    #[test]
    fn test_magenta_side_wraps_to_upper_range() {
        // red is max and blue > green: raw sector value is negative
        let hsv = metrics(Rgb(255, 0, 128));
        assert!(hsv.hue > 0.9 && hsv.hue < 1.0);
    }

    #[test]
    fn test_half_saturation() {
        let hsv = metrics(Rgb(200, 100, 100));
        assert!((hsv.saturation - 0.5).abs() < EPS);
        assert!((hsv.brightness - 200.0 / 255.0).abs() < EPS);
        assert_eq!(hsv.hue, 0.0);
    }
}
