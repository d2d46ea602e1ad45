//! # Swatchcraft
//!
//! A Rust crate for designing color palettes.
//!
//! This library provides the color theory engine behind a palette editor:
//! - Parsing hex colors and converting between RGB, HSL, HSV, Lab and CMYK
//! - Naming colors from a CSS table with descriptive fallbacks
//! - Generating harmonious palettes with locking, roles and resizing
//! - Checking WCAG contrast and simulating color vision deficiencies
//! - Extracting dominant colors from images with weighted k-means
//!
//! All randomness comes from a caller-supplied [`rand::Rng`], so results are
//! reproducible with a seeded generator.
//!
//! ## Example
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use swatchcraft::{contrast_ratio, generate_harmonious_palette, HarmonyPreset, Palette};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let generated = generate_harmonious_palette(Some("#3B82F6"), 5, Some(HarmonyPreset::Triadic), &mut rng)?;
//! let palette = Palette::from_extracted("Triadic blue", &generated.colors)?;
//!
//! let ratio = contrast_ratio(&palette.colors[0].hex, &palette.colors[1].hex);
//! println!("{} colors, first pair contrast {:.2}", palette.colors.len(), ratio);
//! # Ok::<(), swatchcraft::PaletteError>(())
//! ```

pub mod accessibility;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod extraction;
pub mod harmony;
pub mod model;
pub mod naming;

pub use accessibility::{
    best_text_color, contrast_matrix, contrast_ratio, get_accessibility_level, meets_wcag_contrast,
    relative_luminance, simulate_all_types, simulate_color_blindness, simulate_palette,
    AccessibilityLevel, ColorBlindnessType, ContrastPair, CvdCategory, WcagLevel,
};
pub use color::{is_valid_hex, normalize_hex, ColorInfo, HexColor, Rgb};
pub use config::{EngineConfig, ExtractionConfig, GenerationConfig, NamingConfig};
pub use constants::MAX_PALETTE_COLORS;
pub use error::{PaletteError, Result};
pub use extraction::{
    extract_colors, extract_colors_legacy, ColorExtractor, ExtractionAlgorithm, PixelBuffer,
};
pub use harmony::{
    generate_harmonious_palette, harmony_hues, regenerate_unlocked, GeneratedPalette,
    HarmonyPreset, PaletteGenerator,
};
pub use model::{Color, ColorRole, Palette};
pub use naming::{get_color_name, ColorNamer};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_types_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Palette>();
        assert_send_sync::<HexColor>();
        assert_send_sync::<PaletteError>();
        assert_send_sync::<ColorExtractor>();
        assert_send_sync::<PixelBuffer<'static>>();
    }
}
