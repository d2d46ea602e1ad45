//! Tunable constants and reference values for the palette engine
//!
//! This module collects every fixed threshold used by the naming,
//! generation, accessibility and extraction components. The defaults in
//! [`crate::config`] are built from these values.

/// Palette size limits
pub mod palette_limits {
    /// Maximum number of colors in a palette
    pub const MAX_PALETTE_COLORS: usize = 16;

    /// Minimum number of colors in a palette
    pub const MIN_PALETTE_COLORS: usize = 1;
}

pub use palette_limits::MAX_PALETTE_COLORS;

/// Clustering and generation limits
pub mod kmeans {
    /// Hard cap on k-means iterations; convergence is not guaranteed
    pub const MAX_ITERATIONS: usize = 10;

    /// Rejected attempts before the generator falls back to random colors
    pub const MAX_GENERATION_ATTEMPTS: usize = 100;
}

/// Image sampling parameters
pub mod sampling {
    /// Upper bound on pixels read from a single image
    pub const MAX_SAMPLES: usize = 10_000;

    /// Minimum pixels read when the image has that many
    pub const MIN_SAMPLES: usize = 1_000;

    /// Pixels with alpha below this are treated as transparent
    pub const ALPHA_THRESHOLD: u8 = 125;

    /// RGB distance under which two samples are merged before clustering
    pub const DEDUP_DISTANCE: f64 = 10.0;
}

/// Harmony geometry and variation factors
pub mod harmony {
    /// Analogous hue offset in degrees
    pub const ANALOGOUS_OFFSET: f32 = 30.0;

    /// Complementary hue offset in degrees
    pub const COMPLEMENTARY_OFFSET: f32 = 180.0;

    /// Triadic hue offset in degrees
    pub const TRIADIC_OFFSET: f32 = 120.0;

    /// Split-complementary hue offset in degrees
    pub const SPLIT_COMPLEMENTARY_OFFSET: f32 = 150.0;

    /// Square and tetradic quarter turn in degrees
    pub const QUARTER_TURN: f32 = 90.0;

    /// Relative lightness change applied by a variation
    pub const LIGHTNESS_VARIATION: f32 = 0.25;

    /// Relative saturation change applied by a variation
    pub const SATURATION_VARIATION: f32 = 0.35;

    /// Saturation cap for the tinted white and black tokens (0-1)
    pub const NEUTRAL_TINT_SATURATION: f32 = 0.15;

    /// Lightness of the tinted white token (0-1)
    pub const TINTED_WHITE_LIGHTNESS: f32 = 0.97;

    /// Lightness of the tinted black token (0-1)
    pub const TINTED_BLACK_LIGHTNESS: f32 = 0.10;
}

/// WCAG 2.1 contrast thresholds
pub mod wcag {
    /// AA, normal text
    pub const AA_NORMAL: f64 = 4.5;

    /// AA, large text
    pub const AA_LARGE: f64 = 3.0;

    /// AAA, normal text
    pub const AAA_NORMAL: f64 = 7.0;

    /// AAA, large text
    pub const AAA_LARGE: f64 = 4.5;

    /// sRGB linearization threshold used by WCAG
    pub const LINEARIZE_THRESHOLD: f64 = 0.03928;

    /// Luminance weights for R, G, B
    pub const LUMINANCE_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];
}

/// Color naming thresholds
pub mod naming {
    /// CIE76 distance under which the nearest named color is used
    pub const CLOSE_MATCH_DELTA_E: f32 = 5.0;

    /// HSL saturation (0-1) under which a color is named as a gray
    pub const GRAYSCALE_SATURATION: f32 = 0.05;

    /// Lightness (0-1) at or above which a gray is "White"
    pub const GRAY_WHITE_LIGHTNESS: f32 = 0.95;

    /// Lightness (0-1) at or below which a gray is "Black"
    pub const GRAY_BLACK_LIGHTNESS: f32 = 0.05;

    /// Lightness (0-1) at or above which a gray is "Light Gray"
    pub const GRAY_LIGHT_LIGHTNESS: f32 = 0.70;

    /// Lightness (0-1) at or below which a gray is "Dark Gray"
    pub const GRAY_DARK_LIGHTNESS: f32 = 0.30;

    /// Lower bounds (0-1) of the seven lightness bands, lightest first
    pub const LIGHTNESS_BANDS: [f32; 6] = [0.85, 0.70, 0.58, 0.42, 0.30, 0.15];

    /// Lower bounds (0-1) of the five saturation bands, most saturated first
    pub const SATURATION_BANDS: [f32; 4] = [0.85, 0.60, 0.35, 0.15];

    /// Hue sectors as (upper bound in degrees, name); red wraps past 345°
    pub const HUE_SECTORS: [(f32, &str); 11] = [
        (15.0, "Red"),
        (45.0, "Orange"),
        (70.0, "Yellow"),
        (90.0, "Lime"),
        (150.0, "Green"),
        (195.0, "Cyan"),
        (255.0, "Blue"),
        (290.0, "Purple"),
        (320.0, "Magenta"),
        (345.0, "Pink"),
        (360.0, "Red"),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wcag_thresholds_ordered() {
        assert!(wcag::AA_LARGE < wcag::AA_NORMAL);
        assert!(wcag::AA_NORMAL <= wcag::AAA_LARGE);
        assert!(wcag::AAA_LARGE < wcag::AAA_NORMAL);
        let sum: f64 = wcag::LUMINANCE_WEIGHTS.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_bands_descending() {
        assert!(naming::LIGHTNESS_BANDS.windows(2).all(|w| w[0] > w[1]));
        assert!(naming::SATURATION_BANDS.windows(2).all(|w| w[0] > w[1]));
        assert!(naming::HUE_SECTORS.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(naming::HUE_SECTORS.last().map(|s| s.0), Some(360.0));
    }

    #[test]
    fn test_sampling_limits() {
        assert!(sampling::MIN_SAMPLES < sampling::MAX_SAMPLES);
        assert!(palette_limits::MIN_PALETTE_COLORS <= MAX_PALETTE_COLORS);
    }
}
