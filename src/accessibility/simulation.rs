//! Color vision deficiency simulation
//!
//! Each deficiency maps to a fixed 3×3 matrix applied to normalized sRGB.
//! Anomalous trichromacies additionally accept a severity that blends the
//! original and fully simulated colors.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::{hex_to_rgb, HexColor, Rgb};

/// Row-major 3×3 transform on normalized RGB
pub type SimulationMatrix = [[f64; 3]; 3];

/// Broad class of a color vision deficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CvdCategory {
    Normal,
    /// One cone type is shifted (reduced sensitivity)
    AnomalousTrichromacy,
    /// One cone type is missing
    Dichromacy,
    /// Little or no color perception
    Monochromacy,
}

/// Type of color vision simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorBlindnessType {
    #[default]
    Normal,
    Protanomaly,
    Deuteranomaly,
    Tritanomaly,
    Protanopia,
    Deuteranopia,
    Tritanopia,
    Achromatopsia,
    Achromatomaly,
}

impl ColorBlindnessType {
    pub const ALL: [Self; 9] = [
        Self::Normal,
        Self::Protanomaly,
        Self::Deuteranomaly,
        Self::Tritanomaly,
        Self::Protanopia,
        Self::Deuteranopia,
        Self::Tritanopia,
        Self::Achromatopsia,
        Self::Achromatomaly,
    ];

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal Vision",
            Self::Protanomaly => "Protanomaly",
            Self::Deuteranomaly => "Deuteranomaly",
            Self::Tritanomaly => "Tritanomaly",
            Self::Protanopia => "Protanopia",
            Self::Deuteranopia => "Deuteranopia",
            Self::Tritanopia => "Tritanopia",
            Self::Achromatopsia => "Achromatopsia",
            Self::Achromatomaly => "Achromatomaly",
        }
    }

    /// Get description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Normal => "Typical trichromatic color vision",
            Self::Protanomaly => "Reduced sensitivity to red light",
            Self::Deuteranomaly => "Reduced sensitivity to green light",
            Self::Tritanomaly => "Reduced sensitivity to blue light",
            Self::Protanopia => "No red cones; reds appear dark and blend with greens",
            Self::Deuteranopia => "No green cones; reds and greens are hard to tell apart",
            Self::Tritanopia => "No blue cones; blues and yellows are confused",
            Self::Achromatopsia => "Complete color blindness; only shades of gray",
            Self::Achromatomaly => "Partial color blindness with very weak color perception",
        }
    }

    /// Approximate share of the population affected
    pub fn prevalence(&self) -> &'static str {
        match self {
            Self::Normal => "~92% of men, ~99.5% of women",
            Self::Protanomaly => "~1% of men",
            Self::Deuteranomaly => "~5% of men",
            Self::Tritanomaly => "~0.01% of people",
            Self::Protanopia => "~1% of men",
            Self::Deuteranopia => "~1% of men",
            Self::Tritanopia => "~0.003% of people",
            Self::Achromatopsia => "~0.003% of people",
            Self::Achromatomaly => "~0.001% of people",
        }
    }

    pub fn category(&self) -> CvdCategory {
        match self {
            Self::Normal => CvdCategory::Normal,
            Self::Protanomaly | Self::Deuteranomaly | Self::Tritanomaly => {
                CvdCategory::AnomalousTrichromacy
            }
            Self::Protanopia | Self::Deuteranopia | Self::Tritanopia => CvdCategory::Dichromacy,
            Self::Achromatopsia | Self::Achromatomaly => CvdCategory::Monochromacy,
        }
    }

    /// Whether a severity below 1.0 changes the simulation
    pub fn supports_severity(&self) -> bool {
        matches!(
            self,
            Self::Protanomaly | Self::Deuteranomaly | Self::Tritanomaly
        )
    }

    /// Transform matrix; `None` for normal vision
    pub fn matrix(&self) -> Option<SimulationMatrix> {
        let matrix = match self {
            Self::Normal => return None,
            Self::Protanomaly => [
                [0.817, 0.183, 0.0],
                [0.333, 0.667, 0.0],
                [0.0, 0.125, 0.875],
            ],
            Self::Deuteranomaly => [
                [0.8, 0.2, 0.0],
                [0.258, 0.742, 0.0],
                [0.0, 0.142, 0.858],
            ],
            Self::Tritanomaly => [
                [0.967, 0.033, 0.0],
                [0.0, 0.733, 0.267],
                [0.0, 0.183, 0.817],
            ],
            Self::Protanopia => [
                [0.567, 0.433, 0.0],
                [0.558, 0.442, 0.0],
                [0.0, 0.242, 0.758],
            ],
            Self::Deuteranopia => [
                [0.625, 0.375, 0.0],
                [0.7, 0.3, 0.0],
                [0.0, 0.3, 0.7],
            ],
            Self::Tritanopia => [
                [0.95, 0.05, 0.0],
                [0.0, 0.433, 0.567],
                [0.0, 0.475, 0.525],
            ],
            Self::Achromatopsia => [
                [0.299, 0.587, 0.114],
                [0.299, 0.587, 0.114],
                [0.299, 0.587, 0.114],
            ],
            Self::Achromatomaly => [
                [0.618, 0.320, 0.062],
                [0.163, 0.775, 0.062],
                [0.163, 0.320, 0.516],
            ],
        };
        Some(matrix)
    }
}

impl fmt::Display for ColorBlindnessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn apply_matrix(matrix: &SimulationMatrix, rgb: Rgb) -> [f64; 3] {
    let [r, g, b] = rgb.to_f64_array().map(|c| c / 255.0);
    matrix.map(|row| ((row[0] * r + row[1] * g + row[2] * b) * 255.0).clamp(0.0, 255.0))
}

/// Simulate how a color appears with the given deficiency
///
/// # Arguments
///
/// * `hex` - Color to transform
/// * `kind` - Deficiency to simulate
/// * `severity` - 0.0 (original) to 1.0 (full simulation), clamped; only
///   used by anomalous trichromacies
pub fn simulate_color_blindness(hex: &HexColor, kind: ColorBlindnessType, severity: f64) -> HexColor {
    let Some(matrix) = kind.matrix() else {
        return hex.clone();
    };

    let original = hex_to_rgb(hex);
    let simulated = apply_matrix(&matrix, original);

    let channels = if kind.supports_severity() {
        let severity = if severity.is_nan() { 1.0 } else { severity.clamp(0.0, 1.0) };
        let source = original.to_f64_array();
        [0, 1, 2].map(|i| source[i] + (simulated[i] - source[i]) * severity)
    } else {
        simulated
    };

    Rgb::from_f64_array(channels).to_hex()
}

/// Simulate every color of a list, preserving order and duplicates
pub fn simulate_palette(colors: &[HexColor], kind: ColorBlindnessType, severity: f64) -> Vec<HexColor> {
    colors
        .iter()
        .map(|hex| simulate_color_blindness(hex, kind, severity))
        .collect()
}

/// Full-severity preview of `colors` under every vision type
pub fn simulate_all_types(colors: &[HexColor]) -> Vec<(ColorBlindnessType, Vec<HexColor>)> {
    ColorBlindnessType::ALL
        .into_iter()
        .map(|kind| (kind, simulate_palette(colors, kind, 1.0)))
        .collect()
}
