//! Hex color parsing and normalization
//!
//! [`HexColor`] is the validation boundary of the crate: once a string has
//! been normalized into one, every conversion, contrast and simulation
//! function downstream is total.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{PaletteError, Result};

/// Canonical `#RRGGBB` color string (uppercase, leading `#`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Build a hex color from 8-bit channels
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(format!("#{:02X}{:02X}{:02X}", r, g, b))
    }

    /// Borrow the canonical `#RRGGBB` string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the three channels
    pub fn channels(&self) -> (u8, u8, u8) {
        // The inner string is always 7 ASCII characters of validated hex
        let digits = self.0.as_bytes();
        let byte = |i: usize| (hex_value(digits[i]) << 4) | hex_value(digits[i + 1]);
        (byte(1), byte(3), byte(5))
    }
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'A'..=b'F' => digit - b'A' + 10,
        b'a'..=b'f' => digit - b'a' + 10,
        _ => 0,
    }
}

/// Normalize a hex color string
///
/// Accepts 3- or 6-digit hex with or without a leading `#`. Three-digit
/// input is expanded by doubling each digit.
///
/// # Arguments
///
/// * `input` - Hex string such as `"f00"`, `"#3b82f6"` or `"3B82F6"`
///
/// # Returns
///
/// Canonical uppercase `#RRGGBB` color
///
/// # Errors
///
/// Returns `PaletteError::InvalidColor` if the input does not match
/// `^#?([0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$`
pub fn normalize_hex(input: &str) -> Result<HexColor> {
    let digits = input.strip_prefix('#').unwrap_or(input);

    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(PaletteError::invalid_color(input));
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Err(PaletteError::invalid_color(input)),
    };

    Ok(HexColor(format!("#{}", expanded.to_ascii_uppercase())))
}

/// Check whether a string is a valid 3- or 6-digit hex color
pub fn is_valid_hex(input: &str) -> bool {
    normalize_hex(input).is_ok()
}

impl FromStr for HexColor {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self> {
        normalize_hex(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = PaletteError;

    fn try_from(value: String) -> Result<Self> {
        normalize_hex(&value)
    }
}

impl TryFrom<&str> for HexColor {
    type Error = PaletteError;

    fn try_from(value: &str) -> Result<Self> {
        normalize_hex(value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl AsRef<str> for HexColor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for HexColor {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
