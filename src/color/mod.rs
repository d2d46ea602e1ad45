//! Color model and conversion module
//!
//! This module handles hex parsing and normalization, and conversions
//! between RGB, HSL, HSV, CIE Lab and CMYK.

pub mod conversion;
pub mod hex;

pub use conversion::{
    cmyk_to_rgb, delta_e, hex_to_rgb, hsl_to_rgb, hsv_to_rgb, lab_to_rgb, random_color, rgb_to_cmyk,
    rgb_to_hex, rgb_to_hsl, rgb_to_hsv, rgb_to_lab, wrap_hue, Cmyk, ColorInfo, Hsl, Hsv, Rgb,
};
pub use hex::{is_valid_hex, normalize_hex, HexColor};
