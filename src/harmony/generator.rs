//! Harmonious palette generation
//!
//! Builds palettes by walking a preset's token list from a base color,
//! then filling remaining slots with lightness/saturation variations.
//! Duplicate colors are rejected; once the rejection budget is spent the
//! remainder is filled with random colors so generation always terminates.

use rand::Rng;
use std::collections::HashSet;
use tracing::{debug, warn};

use super::{GenerationToken, HarmonyPreset};
use crate::color::{hex_to_rgb, hsl_to_rgb, normalize_hex, random_color, rgb_to_hsl, HexColor, Hsl};
use crate::config::GenerationConfig;
use crate::constants::harmony::{
    NEUTRAL_TINT_SATURATION, TINTED_BLACK_LIGHTNESS, TINTED_WHITE_LIGHTNESS,
};
use crate::constants::palette_limits::{MAX_PALETTE_COLORS, MIN_PALETTE_COLORS};
use crate::model::{Color, Palette};
use crate::naming::get_color_name;
use crate::{PaletteError, Result};

/// Hue rotations tried, in order, when growing a palette from its colors
const GROWTH_OFFSETS: [f32; 8] = [180.0, 30.0, 330.0, 120.0, 240.0, 150.0, 210.0, 90.0];

/// Generated colors plus whether the random fallback was needed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPalette {
    pub colors: Vec<HexColor>,
    /// True when the attempt budget ran out and random colors filled the rest
    pub exhausted: bool,
}

/// Accumulates unique colors up to a target count, counting rejections
struct Collector {
    colors: Vec<HexColor>,
    seen: HashSet<HexColor>,
    target: usize,
    rejected: usize,
}

impl Collector {
    fn new(target: usize) -> Self {
        Self {
            colors: Vec::with_capacity(target),
            seen: HashSet::with_capacity(target),
            target,
            rejected: 0,
        }
    }

    fn is_full(&self) -> bool {
        self.colors.len() >= self.target
    }

    /// Add a color that is already part of the palette, without dedup accounting
    fn seed(&mut self, hex: &HexColor) {
        self.seen.insert(hex.clone());
        self.colors.push(hex.clone());
    }

    fn push(&mut self, hex: HexColor) -> bool {
        if self.is_full() {
            return false;
        }
        if self.seen.insert(hex.clone()) {
            self.colors.push(hex);
            true
        } else {
            self.rejected += 1;
            false
        }
    }
}

/// Palette generator with configurable variation factors
#[derive(Debug, Clone, Default)]
pub struct PaletteGenerator {
    config: GenerationConfig,
}

impl PaletteGenerator {
    /// Create a generator with default factors
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator from configuration
    pub fn with_config(config: GenerationConfig) -> Self {
        Self { config }
    }

    /// Generate `count` harmonious colors
    ///
    /// # Arguments
    ///
    /// * `base` - Base color placed first; a random one is chosen when `None`
    /// * `count` - Number of colors, 1 to 16
    /// * `preset` - Harmony whose tokens drive generation
    /// * `rng` - Random source for the base hue, variation signs and fallback
    ///
    /// # Errors
    ///
    /// Returns `PaletteError::InvalidParameter` if `count` is outside 1..=16
    pub fn generate<R: Rng + ?Sized>(
        &self,
        base: Option<&HexColor>,
        count: usize,
        preset: HarmonyPreset,
        rng: &mut R,
    ) -> Result<GeneratedPalette> {
        if !(MIN_PALETTE_COLORS..=MAX_PALETTE_COLORS).contains(&count) {
            return Err(PaletteError::invalid_parameter("count", count));
        }
        Ok(self.generate_unchecked(base, count, preset, rng))
    }

    fn generate_unchecked<R: Rng + ?Sized>(
        &self,
        base: Option<&HexColor>,
        count: usize,
        preset: HarmonyPreset,
        rng: &mut R,
    ) -> GeneratedPalette {
        let base = match base {
            Some(hex) => hex.clone(),
            None => random_base(rng),
        };
        let base_hsl = rgb_to_hsl(hex_to_rgb(&base));

        let mut collector = Collector::new(count);
        collector.push(base);

        for token in preset.tokens() {
            if collector.is_full() {
                break;
            }
            match token {
                GenerationToken::White => {
                    collector.push(tinted_neutral(base_hsl, TINTED_WHITE_LIGHTNESS));
                }
                GenerationToken::Black => {
                    collector.push(tinted_neutral(base_hsl, TINTED_BLACK_LIGHTNESS));
                }
                GenerationToken::Variations => self.fill_variations(&mut collector, rng),
                hue_token => {
                    for offset in hue_token.hue_offsets() {
                        if collector.is_full() {
                            break;
                        }
                        collector.push(hsl_to_rgb(base_hsl.rotate(*offset)).to_hex());
                    }
                }
            }
        }

        debug!(preset = %preset, count, rejected = collector.rejected, "generated harmonious palette");
        self.finish(collector, rng)
    }

    /// Fill remaining slots with chained variations of the colors chosen so far
    fn fill_variations<R: Rng + ?Sized>(&self, collector: &mut Collector, rng: &mut R) {
        let mut chains: Vec<Hsl> = collector
            .colors
            .iter()
            .map(|hex| rgb_to_hsl(hex_to_rgb(hex)))
            .collect();
        if chains.is_empty() {
            return;
        }

        let mut step = 0;
        while !collector.is_full() && collector.rejected < self.config.max_attempts {
            let slot = step % chains.len();
            let varied = self.vary(chains[slot], rng);
            if collector.push(hsl_to_rgb(varied).to_hex()) {
                chains[slot] = varied;
            }
            step += 1;
        }
    }

    /// Scale lightness and saturation by the configured factors, random sign each
    fn vary<R: Rng + ?Sized>(&self, hsl: Hsl, rng: &mut R) -> Hsl {
        let lightness_sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let saturation_sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        Hsl::new(
            hsl.h,
            (hsl.s * (1.0 + saturation_sign * self.config.saturation_variation)).clamp(0.0, 100.0),
            (hsl.l * (1.0 + lightness_sign * self.config.lightness_variation)).clamp(0.0, 100.0),
        )
    }

    fn finish<R: Rng + ?Sized>(&self, mut collector: Collector, rng: &mut R) -> GeneratedPalette {
        let exhausted = !collector.is_full();
        if exhausted {
            warn!(
                generated = collector.colors.len(),
                target = collector.target,
                rejected = collector.rejected,
                "harmony constraints exhausted, filling palette with random colors"
            );
            while !collector.is_full() {
                collector.push(random_color(rng));
            }
        }
        GeneratedPalette {
            colors: collector.colors,
            exhausted,
        }
    }

    /// Derive `additional` new colors from existing ones by hue rotation
    ///
    /// Returns only the new colors; none of them repeats an existing color.
    pub fn extend<R: Rng + ?Sized>(
        &self,
        existing: &[HexColor],
        additional: usize,
        rng: &mut R,
    ) -> GeneratedPalette {
        if additional == 0 {
            return GeneratedPalette {
                colors: Vec::new(),
                exhausted: false,
            };
        }
        if existing.is_empty() {
            return self.generate_unchecked(None, additional, HarmonyPreset::default(), rng);
        }

        let mut collector = Collector::new(existing.len() + additional);
        for hex in existing {
            collector.seed(hex);
        }

        let sources: Vec<Hsl> = existing.iter().map(|hex| rgb_to_hsl(hex_to_rgb(hex))).collect();
        let mut step = 0;
        while !collector.is_full() && collector.rejected < self.config.max_attempts {
            let source = sources[step % sources.len()];
            let round = step / sources.len();
            let mut candidate = source.rotate(GROWTH_OFFSETS[round % GROWTH_OFFSETS.len()]);
            if round >= GROWTH_OFFSETS.len() {
                candidate = self.vary(candidate, rng);
            }
            collector.push(hsl_to_rgb(candidate).to_hex());
            step += 1;
        }

        let mut generated = self.finish(collector, rng);
        generated.colors = generated.colors.split_off(existing.len());
        generated
    }

    /// Replace every unlocked color, keeping locked ones in place
    ///
    /// The first locked color anchors the harmony; with nothing locked a
    /// random base is used. Ids and roles of replaced colors are preserved.
    pub fn regenerate_unlocked<R: Rng + ?Sized>(
        &self,
        palette: &Palette,
        preset: HarmonyPreset,
        rng: &mut R,
    ) -> Palette {
        let anchor = palette.colors.iter().find(|c| c.locked).map(|c| c.hex.clone());
        let count = palette.colors.len().clamp(MIN_PALETTE_COLORS, MAX_PALETTE_COLORS);
        let generated = self.generate_unchecked(anchor.as_ref(), count, preset, rng);

        let locked: HashSet<&HexColor> = palette
            .colors
            .iter()
            .filter(|c| c.locked)
            .map(|c| &c.hex)
            .collect();
        let mut fresh = generated
            .colors
            .iter()
            .filter(|hex| !locked.contains(hex))
            .cloned();

        let mut colors = Vec::with_capacity(palette.colors.len());
        for color in &palette.colors {
            if color.locked {
                colors.push(color.clone());
                continue;
            }
            let hex = fresh.next().unwrap_or_else(|| random_color(rng));
            colors.push(Color {
                name: Some(get_color_name(&hex)),
                hex,
                ..color.clone()
            });
        }

        Palette {
            colors,
            ..palette.clone()
        }
        .touched()
    }
}

fn random_base<R: Rng + ?Sized>(rng: &mut R) -> HexColor {
    let hsl = Hsl::new(
        rng.gen_range(0.0..360.0),
        rng.gen_range(55.0..=85.0),
        rng.gen_range(40.0..=65.0),
    );
    hsl_to_rgb(hsl).to_hex()
}

fn tinted_neutral(base: Hsl, lightness: f32) -> HexColor {
    let saturation = base.s.min(NEUTRAL_TINT_SATURATION * 100.0);
    hsl_to_rgb(Hsl::new(base.h, saturation, lightness * 100.0)).to_hex()
}

/// Generate a harmonious palette from an optional hex string
///
/// # Arguments
///
/// * `base` - Optional base color in any accepted hex form
/// * `count` - Number of colors, 1 to 16
/// * `preset` - Harmony preset, [`HarmonyPreset::WebFriendly`] when `None`
/// * `rng` - Random source
///
/// # Errors
///
/// Returns `PaletteError::InvalidColor` for a malformed base and
/// `PaletteError::InvalidParameter` for an out-of-range count
pub fn generate_harmonious_palette<R: Rng + ?Sized>(
    base: Option<&str>,
    count: usize,
    preset: Option<HarmonyPreset>,
    rng: &mut R,
) -> Result<GeneratedPalette> {
    let base = base.map(normalize_hex).transpose()?;
    PaletteGenerator::new().generate(base.as_ref(), count, preset.unwrap_or_default(), rng)
}

/// Replace unlocked colors of a palette with default generator settings
pub fn regenerate_unlocked<R: Rng + ?Sized>(
    palette: &Palette,
    preset: HarmonyPreset,
    rng: &mut R,
) -> Palette {
    PaletteGenerator::new().regenerate_unlocked(palette, preset, rng)
}
