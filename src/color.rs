//! Hex parsing, RGB to HSL conversion and hue-rotated palettes.

use std::fmt;

use palette::{FromColor, Hsl as PaletteHsl, Srgb, encoding};
use serde::{Deserialize, Serialize};

/// An HSL triple with integer components.
///
/// `h` is in degrees `[0, 360)`, `s` and `l` are percentages `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl Hsl {
    pub const fn new(h: u16, s: u8, l: u8) -> Self {
        Self { h, s, l }
    }

    /// CSS functional notation, e.g. `hsl(237, 49%, 76%)`.
    pub fn to_css(&self) -> String {
        format!("hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }

    /// CSS functional notation with an alpha component, e.g. `hsl(237, 49%, 76%, 0.1)`.
    pub fn to_css_alpha(&self, alpha: f32) -> String {
        format!("hsl({}, {}%, {}%, {})", self.h, self.s, self.l, alpha)
    }

    /// Same hue and saturation with lightness lowered by `delta` (floored at 0).
    pub fn darken(&self, delta: u8) -> Self {
        Self {
            l: self.l.saturating_sub(delta),
            ..*self
        }
    }

    /// Convert back to 8-bit sRGB.
    pub fn to_srgb(&self) -> Srgb<u8> {
        let hsl: PaletteHsl<encoding::Srgb, f64> = PaletteHsl::new(
            f64::from(self.h),
            f64::from(self.s) / 100.0,
            f64::from(self.l) / 100.0,
        );
        Srgb::<f64>::from_color(hsl).into_format()
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Parse `#RGB` or `#RRGGBB` into normalized sRGB.
///
/// Any other length yields black. The leading character is not inspected and
/// a digit pair that is not valid hexadecimal reads as 0.
///
/// ```
/// use tabtint::color::hex_to_rgb;
///
/// let white = hex_to_rgb("#fff");
/// assert_eq!((white.red, white.green, white.blue), (1.0, 1.0, 1.0));
/// assert_eq!(hex_to_rgb("#ab").red, 0.0);
/// assert_eq!(hex_to_rgb("#1g0000").red, 0.0);
/// ```
pub fn hex_to_rgb(hex: &str) -> Srgb<f64> {
    let digits: Vec<char> = hex.chars().collect();
    let [r, g, b] = match digits.len() {
        4 => [1, 2, 3].map(|i| channel(&[digits[i], digits[i]])),
        7 => [1, 3, 5].map(|i| channel(&digits[i..i + 2])),
        _ => [0, 0, 0],
    };
    Srgb::new(r, g, b).into_format()
}

/// Both digits must be hexadecimal or the channel reads as 0. There is no
/// prefix parsing: `1g` gives 0, not 1.
fn channel(pair: &[char]) -> u8 {
    let text: String = pair.iter().collect();
    u8::from_str_radix(&text, 16).unwrap_or(0)
}

/// RGB to HSL without rounding.
///
/// When several channels share the maximum, the hue is taken from the first
/// of red, green, blue in that order.
pub fn rgb_to_hsl_unrounded(rgb: Srgb<f64>) -> PaletteHsl<encoding::Srgb, f64> {
    let (r, g, b) = (rgb.red, rgb.green, rgb.blue);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return PaletteHsl::new(0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let sector = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    PaletteHsl::new(sector / 6.0 * 360.0, s, l)
}

/// RGB to integer HSL.
///
/// ```
/// use palette::Srgb;
/// use tabtint::color::{Hsl, rgb_to_hsl};
///
/// assert_eq!(rgb_to_hsl(Srgb::new(1.0, 1.0, 1.0)), Hsl::new(0, 0, 100));
/// ```
pub fn rgb_to_hsl(rgb: Srgb<f64>) -> Hsl {
    let hsl = rgb_to_hsl_unrounded(rgb);
    let hue = hsl.hue.into_positive_degrees().round() as u16 % 360;
    Hsl {
        h: hue,
        s: (hsl.saturation * 100.0).round() as u8,
        l: (hsl.lightness * 100.0).round() as u8,
    }
}

/// Rotate the hue of `base_hex` by `step` degrees per entry.
///
/// Saturation and lightness stay those of the base colour; entry 0 is the
/// base colour itself.
///
/// ```
/// use tabtint::color::generate_hue_variations;
///
/// let hues: Vec<u16> = generate_hue_variations("#a4a7e0", 5, -15)
///     .iter()
///     .map(|c| c.h)
///     .collect();
/// assert_eq!(hues, vec![237, 222, 207, 192, 177]);
/// ```
pub fn generate_hue_variations(base_hex: &str, count: usize, step: i32) -> Vec<Hsl> {
    let base = rgb_to_hsl(hex_to_rgb(base_hex));
    (0..count)
        .map(|i| {
            let hue = i64::from(base.h) + i as i64 * i64::from(step);
            Hsl {
                h: hue.rem_euclid(360) as u16,
                ..base
            }
        })
        .collect()
}

/// Format 8-bit sRGB as `#rrggbb`.
pub fn srgb_to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}
