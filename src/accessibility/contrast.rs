//! WCAG 2.x contrast analysis

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::{hex_to_rgb, HexColor, Rgb};
use crate::constants::wcag::{AAA_LARGE, AAA_NORMAL, AA_LARGE, AA_NORMAL};

/// WCAG conformance level a check is made against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "AAA")]
    Aaa,
}

impl WcagLevel {
    /// Minimum contrast ratio for this level
    pub fn required_ratio(&self, is_large_text: bool) -> f64 {
        match (self, is_large_text) {
            (WcagLevel::Aa, false) => AA_NORMAL,
            (WcagLevel::Aa, true) => AA_LARGE,
            (WcagLevel::Aaa, false) => AAA_NORMAL,
            (WcagLevel::Aaa, true) => AAA_LARGE,
        }
    }
}

/// Highest level a color pair reaches for normal-size text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessibilityLevel {
    #[serde(rename = "AAA")]
    Aaa,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "Fail")]
    Fail,
}

impl AccessibilityLevel {
    pub fn label(&self) -> &'static str {
        match self {
            AccessibilityLevel::Aaa => "AAA",
            AccessibilityLevel::Aa => "AA",
            AccessibilityLevel::Fail => "Fail",
        }
    }

    pub fn passes(&self) -> bool {
        !matches!(self, AccessibilityLevel::Fail)
    }
}

impl fmt::Display for AccessibilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// WCAG relative luminance of a color, in [0, 1]
pub fn relative_luminance(hex: &HexColor) -> f64 {
    hex_to_rgb(hex).relative_luminance()
}

/// Contrast ratio between two colors, in [1, 21]
///
/// Symmetric: the lighter color is always the numerator.
pub fn contrast_ratio(a: &HexColor, b: &HexColor) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Check whether a foreground/background pair meets a WCAG level
pub fn meets_wcag_contrast(
    foreground: &HexColor,
    background: &HexColor,
    level: WcagLevel,
    is_large_text: bool,
) -> bool {
    contrast_ratio(foreground, background) >= level.required_ratio(is_large_text)
}

/// Classify a contrast ratio using the normal-text thresholds
pub fn get_accessibility_level(ratio: f64) -> AccessibilityLevel {
    if ratio >= AAA_NORMAL {
        AccessibilityLevel::Aaa
    } else if ratio >= AA_NORMAL {
        AccessibilityLevel::Aa
    } else {
        AccessibilityLevel::Fail
    }
}

/// Black or white, whichever contrasts more with `background`
pub fn best_text_color(background: &HexColor) -> HexColor {
    let black = Rgb::BLACK.to_hex();
    let white = Rgb::WHITE.to_hex();
    if contrast_ratio(background, &black) >= contrast_ratio(background, &white) {
        black
    } else {
        white
    }
}

/// Contrast of one ordered foreground/background pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastPair {
    pub foreground: HexColor,
    pub background: HexColor,
    pub ratio: f64,
    pub level: AccessibilityLevel,
}

/// Contrast of every ordered pair of distinct positions in `colors`
///
/// Pairs are emitted row by row: all backgrounds for `colors[0]` as
/// foreground first.
pub fn contrast_matrix(colors: &[HexColor]) -> Vec<ContrastPair> {
    let mut pairs = Vec::with_capacity(colors.len() * colors.len().saturating_sub(1));
    for (i, foreground) in colors.iter().enumerate() {
        for (j, background) in colors.iter().enumerate() {
            if i == j {
                continue;
            }
            let ratio = contrast_ratio(foreground, background);
            pairs.push(ContrastPair {
                foreground: foreground.clone(),
                background: background.clone(),
                ratio,
                level: get_accessibility_level(ratio),
            });
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::normalize_hex;

    fn hex(input: &str) -> HexColor {
        normalize_hex(input).unwrap()
    }

    #[test]
    fn test_black_on_white_is_21() {
        let ratio = contrast_ratio(&hex("#000000"), &hex("#FFFFFF"));
        assert!((ratio - 21.0).abs() < 1e-6);
        assert_eq!(get_accessibility_level(ratio), AccessibilityLevel::Aaa);
    }

    #[test]
    fn test_contrast_properties() {
        let samples = ["#3B82F6", "#10B981", "#F59E0B", "#111827", "#FFFFFF", "#7F7F7F"];
        for a in samples {
            assert!((contrast_ratio(&hex(a), &hex(a)) - 1.0).abs() < 1e-12);
            for b in samples {
                let ab = contrast_ratio(&hex(a), &hex(b));
                let ba = contrast_ratio(&hex(b), &hex(a));
                assert_eq!(ab, ba);
                assert!((1.0..=21.0 + 1e-9).contains(&ab));
            }
        }
    }

    #[test]
    fn test_wcag_thresholds() {
        // #767676 on white is the classic 4.54:1 AA boundary
        let gray = hex("#767676");
        let white = hex("#FFFFFF");
        assert!(meets_wcag_contrast(&gray, &white, WcagLevel::Aa, false));
        assert!(!meets_wcag_contrast(&gray, &white, WcagLevel::Aaa, false));
        assert!(meets_wcag_contrast(&gray, &white, WcagLevel::Aaa, true));

        let light = hex("#949494");
        assert!(!meets_wcag_contrast(&light, &white, WcagLevel::Aa, false));
        assert!(meets_wcag_contrast(&light, &white, WcagLevel::Aa, true));
    }

    #[test]
    fn test_aaa_implies_aa() {
        let samples = ["#000000", "#333333", "#767676", "#3B82F6", "#FDE68A"];
        for a in samples {
            for b in samples {
                for large in [false, true] {
                    if meets_wcag_contrast(&hex(a), &hex(b), WcagLevel::Aaa, large) {
                        assert!(meets_wcag_contrast(&hex(a), &hex(b), WcagLevel::Aa, large));
                    }
                }
            }
        }
    }

    #[test]
    fn test_accessibility_level_bands() {
        assert_eq!(get_accessibility_level(7.0), AccessibilityLevel::Aaa);
        assert_eq!(get_accessibility_level(6.99), AccessibilityLevel::Aa);
        assert_eq!(get_accessibility_level(4.5), AccessibilityLevel::Aa);
        assert_eq!(get_accessibility_level(4.49), AccessibilityLevel::Fail);
        assert!(!AccessibilityLevel::Fail.passes());
    }

    #[test]
    fn test_best_text_color() {
        assert_eq!(best_text_color(&hex("#FFFFFF")), "#000000");
        assert_eq!(best_text_color(&hex("#111827")), "#FFFFFF");
        assert_eq!(best_text_color(&hex("#FDE68A")), "#000000");
    }

    #[test]
    fn test_contrast_matrix() {
        let colors = vec![hex("#000"), hex("#FFF"), hex("#3B82F6")];
        let matrix = contrast_matrix(&colors);
        assert_eq!(matrix.len(), 6);
        assert_eq!(matrix[0].foreground, "#000000");
        assert_eq!(matrix[0].background, "#FFFFFF");
        assert_eq!(matrix[0].level, AccessibilityLevel::Aaa);
        assert!(contrast_matrix(&colors[..1]).is_empty());

        let json = serde_json::to_value(&matrix[0]).unwrap();
        assert_eq!(json["level"], "AAA");
    }
}
