//! Color space conversion utilities
//!
//! Provides conversions between the color models the palette engine uses:
//! - Hex to/from 8-bit RGB
//! - RGB to/from HSL and HSV (hue in degrees, other channels in percent)
//! - RGB to/from CIE Lab (D65 white point) with gamut clamping
//! - RGB to/from CMYK (percent)
//!
//! All functions are total: inputs have already passed through
//! [`normalize_hex`](super::normalize_hex) or are typed channel values.

use palette::{FromColor, Lab, Srgb};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::HexColor;
use crate::constants::wcag;

/// 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// HSL color: hue in degrees [0, 360), saturation and lightness in percent [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

/// HSV color: hue in degrees [0, 360), saturation and value in percent [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

/// CMYK color, each channel in percent [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cmyk {
    pub c: f32,
    pub m: f32,
    pub y: f32,
    pub k: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Canonical hex representation
    pub fn to_hex(self) -> HexColor {
        HexColor::from_rgb(self.r, self.g, self.b)
    }

    /// Channels normalized to [0, 1] as a `palette` sRGB value
    pub fn to_srgb(self) -> Srgb {
        Srgb::new(self.r, self.g, self.b).into_format()
    }

    /// Clamp a floating point sRGB value to gamut and quantize to 8 bits
    pub fn from_srgb_clamped(srgb: Srgb) -> Self {
        Self {
            r: unit_to_byte(srgb.red),
            g: unit_to_byte(srgb.green),
            b: unit_to_byte(srgb.blue),
        }
    }

    /// WCAG relative luminance in [0, 1]
    ///
    /// Linearizes each channel with the WCAG 2.x threshold (0.03928) and
    /// gamma 2.4, then applies the Rec. 709 luminance weights.
    pub fn relative_luminance(self) -> f64 {
        fn linearize(c: u8) -> f64 {
            let c = c as f64 / 255.0;
            if c <= wcag::LINEARIZE_THRESHOLD {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        let [wr, wg, wb] = wcag::LUMINANCE_WEIGHTS;
        wr * linearize(self.r) + wg * linearize(self.g) + wb * linearize(self.b)
    }

    /// Channels as floats in the 0-255 range
    pub fn to_f64_array(self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }

    /// Round and clamp floating channels in the 0-255 range
    pub fn from_f64_array(channels: [f64; 3]) -> Self {
        let byte = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        Self::new(byte(channels[0]), byte(channels[1]), byte(channels[2]))
    }
}

fn unit_to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl From<&HexColor> for Rgb {
    fn from(hex: &HexColor) -> Self {
        hex_to_rgb(hex)
    }
}

impl Hsl {
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    /// Hue rotated by `degrees`, wrapped into [0, 360)
    pub fn rotate(self, degrees: f32) -> Self {
        Self {
            h: wrap_hue(self.h + degrees),
            ..self
        }
    }
}

/// Wrap a hue angle into [0, 360)
pub fn wrap_hue(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Decode a hex color into 8-bit channels
pub fn hex_to_rgb(hex: &HexColor) -> Rgb {
    let (r, g, b) = hex.channels();
    Rgb::new(r, g, b)
}

/// Encode 8-bit channels as a canonical hex color
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> HexColor {
    HexColor::from_rgb(r, g, b)
}

/// Convert RGB to HSL
///
/// # Arguments
///
/// * `rgb` - 8-bit sRGB color
///
/// # Returns
///
/// HSL with hue in degrees and saturation/lightness in percent. Grays have hue 0.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let hsl: palette::Hsl = palette::Hsl::from_color(rgb.to_srgb());
    Hsl {
        h: wrap_hue(hsl.hue.into_positive_degrees()),
        s: hsl.saturation * 100.0,
        l: hsl.lightness * 100.0,
    }
}

/// Convert HSL (degrees, percent, percent) to RGB
///
/// Saturation and lightness are clamped to [0, 100] before conversion.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let hsl: palette::Hsl = palette::Hsl::new(
        wrap_hue(hsl.h),
        (hsl.s / 100.0).clamp(0.0, 1.0),
        (hsl.l / 100.0).clamp(0.0, 1.0),
    );
    Rgb::from_srgb_clamped(Srgb::from_color(hsl))
}

/// Convert RGB to HSV
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let hsv: palette::Hsv = palette::Hsv::from_color(rgb.to_srgb());
    Hsv {
        h: wrap_hue(hsv.hue.into_positive_degrees()),
        s: hsv.saturation * 100.0,
        v: hsv.value * 100.0,
    }
}

/// Convert HSV (degrees, percent, percent) to RGB
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let hsv: palette::Hsv = palette::Hsv::new(
        wrap_hue(hsv.h),
        (hsv.s / 100.0).clamp(0.0, 1.0),
        (hsv.v / 100.0).clamp(0.0, 1.0),
    );
    Rgb::from_srgb_clamped(Srgb::from_color(hsv))
}

/// Convert RGB to CIE Lab (D65)
pub fn rgb_to_lab(rgb: Rgb) -> Lab {
    Lab::from_color(rgb.to_srgb())
}

/// Convert CIE Lab to RGB, clamping out-of-gamut values
pub fn lab_to_rgb(lab: Lab) -> Rgb {
    Rgb::from_srgb_clamped(Srgb::from_color(lab))
}

/// Convert RGB to CMYK
///
/// Uses the subtractive formula `k = 1 - max(r, g, b)`,
/// `c = (1 - r - k) / (1 - k)`. Pure black yields `c = m = y = 0`, `k = 100`.
pub fn rgb_to_cmyk(rgb: Rgb) -> Cmyk {
    let r = rgb.r as f32 / 255.0;
    let g = rgb.g as f32 / 255.0;
    let b = rgb.b as f32 / 255.0;

    let k = 1.0 - r.max(g).max(b);
    if k >= 1.0 {
        return Cmyk {
            c: 0.0,
            m: 0.0,
            y: 0.0,
            k: 100.0,
        };
    }

    let channel = |v: f32| (1.0 - v - k) / (1.0 - k) * 100.0;
    Cmyk {
        c: channel(r),
        m: channel(g),
        y: channel(b),
        k: k * 100.0,
    }
}

/// Convert CMYK (percent) to RGB
pub fn cmyk_to_rgb(cmyk: Cmyk) -> Rgb {
    let k = (cmyk.k / 100.0).clamp(0.0, 1.0);
    let channel = |v: f32| {
        let v = (v / 100.0).clamp(0.0, 1.0);
        ((1.0 - v) * (1.0 - k) * 255.0).round() as u8
    };
    Rgb::new(channel(cmyk.c), channel(cmyk.m), channel(cmyk.y))
}

/// Compute Delta E (color difference) between two Lab colors
///
/// Uses simple Euclidean distance (ΔE76)
pub fn delta_e(lab1: Lab, lab2: Lab) -> f32 {
    let dl = lab1.l - lab2.l;
    let da = lab1.a - lab2.a;
    let db = lab1.b - lab2.b;
    (dl * dl + da * da + db * db).sqrt()
}

/// Uniformly sample the RGB cube
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> HexColor {
    HexColor::from_rgb(rng.gen(), rng.gen(), rng.gen())
}

/// Every representation of a color, for detail views and exports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorInfo {
    pub hex: HexColor,
    pub rgb: Rgb,
    pub hsl: Hsl,
    pub hsv: Hsv,
    pub lab: Lab,
    pub cmyk: Cmyk,
    pub name: String,
}

impl ColorInfo {
    /// Compute all representations and the name of a color
    pub fn from_hex(hex: &HexColor) -> Self {
        let rgb = hex_to_rgb(hex);
        Self {
            hex: hex.clone(),
            rgb,
            hsl: rgb_to_hsl(rgb),
            hsv: rgb_to_hsv(rgb),
            lab: rgb_to_lab(rgb),
            cmyk: rgb_to_cmyk(rgb),
            name: crate::naming::get_color_name(hex),
        }
    }
}
