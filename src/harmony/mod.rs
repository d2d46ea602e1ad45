//! Color harmony presets
//!
//! A [`HarmonyPreset`] is an ordered list of [`GenerationToken`]s. Hue
//! tokens rotate the base hue by fixed offsets; `White` and `Black` add
//! tinted neutrals; `Variations` fills the remaining slots with lightness
//! and saturation variations of the colors chosen so far.

pub mod generator;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::color::wrap_hue;
use crate::constants::harmony::{
    ANALOGOUS_OFFSET, COMPLEMENTARY_OFFSET, QUARTER_TURN, SPLIT_COMPLEMENTARY_OFFSET,
    TRIADIC_OFFSET,
};
use crate::PaletteError;

pub use generator::{
    generate_harmonious_palette, regenerate_unlocked, GeneratedPalette, PaletteGenerator,
};

/// One step of palette generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationToken {
    White,
    Black,
    Complementary,
    Analogous,
    Triadic,
    Tetradic,
    SplitComplementary,
    Square,
    Compound,
    Variations,
}

impl GenerationToken {
    /// Hue offsets in degrees from the base hue, in emission order
    ///
    /// Empty for tokens that do not rotate the hue.
    pub fn hue_offsets(&self) -> &'static [f32] {
        const ANALOGOUS: [f32; 2] = [ANALOGOUS_OFFSET, 360.0 - ANALOGOUS_OFFSET];
        const COMPLEMENTARY: [f32; 1] = [COMPLEMENTARY_OFFSET];
        const TRIADIC: [f32; 2] = [TRIADIC_OFFSET, 360.0 - TRIADIC_OFFSET];
        const TETRADIC: [f32; 3] = [
            COMPLEMENTARY_OFFSET,
            QUARTER_TURN,
            COMPLEMENTARY_OFFSET + QUARTER_TURN,
        ];
        const SPLIT: [f32; 2] = [SPLIT_COMPLEMENTARY_OFFSET, 360.0 - SPLIT_COMPLEMENTARY_OFFSET];
        const SQUARE: [f32; 3] = [QUARTER_TURN, 2.0 * QUARTER_TURN, 3.0 * QUARTER_TURN];
        const COMPOUND: [f32; 3] = [
            ANALOGOUS_OFFSET,
            COMPLEMENTARY_OFFSET,
            COMPLEMENTARY_OFFSET + ANALOGOUS_OFFSET,
        ];

        match self {
            GenerationToken::Analogous => &ANALOGOUS,
            GenerationToken::Complementary => &COMPLEMENTARY,
            GenerationToken::Triadic => &TRIADIC,
            GenerationToken::Tetradic => &TETRADIC,
            GenerationToken::SplitComplementary => &SPLIT,
            GenerationToken::Square => &SQUARE,
            GenerationToken::Compound => &COMPOUND,
            GenerationToken::White | GenerationToken::Black | GenerationToken::Variations => &[],
        }
    }
}

/// Color-theory harmony used to derive a palette from a base color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HarmonyPreset {
    Complementary,
    Analogous,
    Triadic,
    /// Two complementary pairs a quarter turn apart
    Tetradic,
    SplitComplementary,
    Square,
    /// Complementary pair biased towards the base's analogous neighbors
    Compound,
    Monochromatic,
    /// Base color, tinted white and black, complement and analogous accents
    #[default]
    WebFriendly,
}

impl HarmonyPreset {
    pub const ALL: [Self; 9] = [
        Self::Complementary,
        Self::Analogous,
        Self::Triadic,
        Self::Tetradic,
        Self::SplitComplementary,
        Self::Square,
        Self::Compound,
        Self::Monochromatic,
        Self::WebFriendly,
    ];

    /// Ordered generation tokens; the base color always precedes them
    pub fn tokens(&self) -> &'static [GenerationToken] {
        use GenerationToken as T;
        match self {
            Self::Complementary => &[T::Complementary, T::Variations],
            Self::Analogous => &[T::Analogous, T::Variations],
            Self::Triadic => &[T::Triadic, T::Variations],
            Self::Tetradic => &[T::Tetradic, T::Variations],
            Self::SplitComplementary => &[T::SplitComplementary, T::Variations],
            Self::Square => &[T::Square, T::Variations],
            Self::Compound => &[T::Compound, T::Variations],
            Self::Monochromatic => &[T::Variations],
            Self::WebFriendly => &[
                T::White,
                T::Black,
                T::Complementary,
                T::Analogous,
                T::Variations,
            ],
        }
    }

    /// Kebab-case identifier, as used in JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complementary => "complementary",
            Self::Analogous => "analogous",
            Self::Triadic => "triadic",
            Self::Tetradic => "tetradic",
            Self::SplitComplementary => "split-complementary",
            Self::Square => "square",
            Self::Compound => "compound",
            Self::Monochromatic => "monochromatic",
            Self::WebFriendly => "web-friendly",
        }
    }

    /// Human-readable label for UI display
    pub fn label(&self) -> &'static str {
        match self {
            Self::Complementary => "Complementary",
            Self::Analogous => "Analogous",
            Self::Triadic => "Triadic",
            Self::Tetradic => "Tetradic",
            Self::SplitComplementary => "Split Complementary",
            Self::Square => "Square",
            Self::Compound => "Compound",
            Self::Monochromatic => "Monochromatic",
            Self::WebFriendly => "Web Friendly",
        }
    }
}

impl fmt::Display for HarmonyPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HarmonyPreset {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s
            .trim()
            .to_ascii_lowercase()
            .replace(|c: char| c == '_' || c == ' ', "-");
        Self::ALL
            .into_iter()
            .find(|preset| preset.as_str() == wanted)
            .ok_or_else(|| PaletteError::invalid_parameter("preset", s))
    }
}

/// Hues derived from `base_hue` by every hue token of `preset`, in order
///
/// The base hue itself is not included.
pub fn harmony_hues(base_hue: f32, preset: HarmonyPreset) -> Vec<f32> {
    preset
        .tokens()
        .iter()
        .flat_map(|token| token.hue_offsets())
        .map(|offset| wrap_hue(base_hue + offset))
        .collect()
}
