//! Perceptual color naming
//!
//! Maps an arbitrary color to a human-readable name:
//! - Pure black and white short-circuit
//! - Exact match against the CSS named color table
//! - Nearest named color when it is within a ΔE76 threshold in Lab
//! - Lightness-only names for near-grays
//! - A descriptive "{saturation} {lightness} {hue}" name otherwise
//!
//! Naming is pure: the same hex always yields the same name.

pub mod database;

use palette::Lab;
use std::sync::OnceLock;

use crate::color::{delta_e, hex_to_rgb, rgb_to_hsl, rgb_to_lab, HexColor, Rgb};
use crate::config::NamingConfig;
use crate::constants::naming::{
    CLOSE_MATCH_DELTA_E, GRAYSCALE_SATURATION, GRAY_BLACK_LIGHTNESS, GRAY_DARK_LIGHTNESS,
    GRAY_LIGHT_LIGHTNESS, GRAY_WHITE_LIGHTNESS, HUE_SECTORS, LIGHTNESS_BANDS, SATURATION_BANDS,
};

pub use database::{NamedColor, NAMED_COLORS};

/// Descriptors for the seven lightness bands, lightest first
const LIGHTNESS_DESCRIPTORS: [&str; 7] = ["very light", "light", "", "", "", "dark", "very dark"];

/// Descriptors for the five saturation bands, most saturated first
const SATURATION_DESCRIPTORS: [&str; 5] = ["vivid", "", "", "muted", "grayish"];

/// Nearest entry of the named color table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedMatch {
    pub color: &'static NamedColor,
    /// ΔE76 distance to the queried color
    pub distance: f32,
}

fn named_labs() -> &'static [Lab] {
    static LABS: OnceLock<Vec<Lab>> = OnceLock::new();
    LABS.get_or_init(|| NAMED_COLORS.iter().map(|c| rgb_to_lab(c.rgb)).collect())
}

/// Color namer with a configurable close-match threshold
#[derive(Debug, Clone)]
pub struct ColorNamer {
    close_match_delta_e: f32,
}

impl Default for ColorNamer {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorNamer {
    /// Create a namer with the default close-match threshold
    pub fn new() -> Self {
        Self {
            close_match_delta_e: CLOSE_MATCH_DELTA_E,
        }
    }

    /// Create a namer with a custom close-match threshold (ΔE76)
    pub fn with_threshold(close_match_delta_e: f32) -> Self {
        Self {
            close_match_delta_e,
        }
    }

    /// Create a namer from configuration
    pub fn from_config(config: &NamingConfig) -> Self {
        Self::with_threshold(config.close_match_delta_e)
    }

    /// Name a color
    ///
    /// # Arguments
    ///
    /// * `hex` - Normalized hex color
    ///
    /// # Returns
    ///
    /// Title-cased name such as `"Red"`, `"Light Gray"` or `"Vivid Dark Blue"`
    pub fn name(&self, hex: &HexColor) -> String {
        self.name_rgb(hex_to_rgb(hex))
    }

    /// Name an 8-bit RGB color
    pub fn name_rgb(&self, rgb: Rgb) -> String {
        if rgb == Rgb::BLACK {
            return "Black".to_string();
        }
        if rgb == Rgb::WHITE {
            return "White".to_string();
        }

        if let Some(exact) = database::find_exact(rgb) {
            return exact.name.to_string();
        }

        let nearest = nearest_named(rgb);
        if nearest.distance < self.close_match_delta_e {
            return nearest.color.name.to_string();
        }

        let hsl = rgb_to_hsl(rgb);
        describe(hsl.h, hsl.s / 100.0, hsl.l / 100.0)
    }
}

/// Find the perceptually nearest entry of the named color table
pub fn nearest_named(rgb: Rgb) -> NamedMatch {
    let lab = rgb_to_lab(rgb);
    let mut best = NamedMatch {
        color: &NAMED_COLORS[0],
        distance: f32::MAX,
    };

    for (entry, entry_lab) in NAMED_COLORS.iter().zip(named_labs()) {
        let distance = delta_e(lab, *entry_lab);
        if distance < best.distance {
            best = NamedMatch {
                color: entry,
                distance,
            };
        }
    }

    best
}

/// Name a color with the default namer
pub fn get_color_name(hex: &HexColor) -> String {
    ColorNamer::new().name(hex)
}

/// Build a descriptive name from HSL (hue in degrees, saturation and lightness in 0-1)
///
/// Near-grays are named by lightness alone.
pub fn describe(hue: f32, saturation: f32, lightness: f32) -> String {
    if saturation < GRAYSCALE_SATURATION {
        return gray_name(lightness).to_string();
    }

    let saturation_word = SATURATION_DESCRIPTORS[band_index(saturation, &SATURATION_BANDS)];
    let lightness_word = LIGHTNESS_DESCRIPTORS[band_index(lightness, &LIGHTNESS_BANDS)];

    [saturation_word, lightness_word, hue_name(hue)]
        .iter()
        .filter(|part| !part.is_empty())
        .map(|part| title_case(part))
        .collect::<Vec<_>>()
        .join(" ")
}

fn gray_name(lightness: f32) -> &'static str {
    if lightness >= GRAY_WHITE_LIGHTNESS {
        "White"
    } else if lightness <= GRAY_BLACK_LIGHTNESS {
        "Black"
    } else if lightness >= GRAY_LIGHT_LIGHTNESS {
        "Light Gray"
    } else if lightness <= GRAY_DARK_LIGHTNESS {
        "Dark Gray"
    } else {
        "Gray"
    }
}

/// Index of the first band whose lower bound `value` reaches; the last
/// band catches everything below
fn band_index(value: f32, lower_bounds: &[f32]) -> usize {
    lower_bounds
        .iter()
        .position(|&bound| value >= bound)
        .unwrap_or(lower_bounds.len())
}

/// Named hue sector for a hue angle in degrees
pub fn hue_name(hue: f32) -> &'static str {
    let hue = crate::color::wrap_hue(hue);
    HUE_SECTORS
        .iter()
        .find(|(upper, _)| hue < *upper)
        .map(|(_, name)| *name)
        .unwrap_or("Red")
}

fn title_case(word: &str) -> String {
    word.split_whitespace()
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
