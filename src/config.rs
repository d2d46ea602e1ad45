//! Configuration structures for the palette engine.
//!
//! This module defines the tunable parameters for naming, generation and
//! extraction, organized into one group per component.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use swatchcraft::EngineConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = EngineConfig::from_json_file(Path::new("engine.json"))?;
//!
//! // Or use defaults
//! let config = EngineConfig::default();
//! # Ok::<(), swatchcraft::PaletteError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`NamingConfig`]: close-match threshold for the named color table
//! - [`GenerationConfig`]: variation factors and attempt cap
//! - [`ExtractionConfig`]: sampling, deduplication and clustering limits

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{harmony, kmeans, naming, sampling};
use crate::Result;

/// Complete engine configuration.
///
/// Missing sections in a JSON file fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Color naming configuration
    pub naming: NamingConfig,

    /// Palette generation configuration
    pub generation: GenerationConfig,

    /// Image color extraction configuration
    pub extraction: ExtractionConfig,
}

/// Color naming parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// CIE76 distance under which the nearest named color wins
    pub close_match_delta_e: f32,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            close_match_delta_e: naming::CLOSE_MATCH_DELTA_E,
        }
    }
}

/// Palette generation parameters.
///
/// Variation factors are relative: 0.25 moves lightness by a quarter of
/// its current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Relative lightness change per variation (0.0-1.0)
    pub lightness_variation: f32,

    /// Relative saturation change per variation (0.0-1.0)
    pub saturation_variation: f32,

    /// Rejected attempts before falling back to random colors
    pub max_attempts: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            lightness_variation: harmony::LIGHTNESS_VARIATION,
            saturation_variation: harmony::SATURATION_VARIATION,
            max_attempts: kmeans::MAX_GENERATION_ATTEMPTS,
        }
    }
}

/// Image color extraction parameters.
///
/// Controls how many pixels are read, how aggressively near-duplicates are
/// merged, and how long clustering may run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Upper bound on sampled pixels
    pub max_samples: usize,

    /// Minimum sampled pixels when the image has that many
    pub min_samples: usize,

    /// Pixels with lower alpha are skipped
    pub alpha_threshold: u8,

    /// RGB distance under which samples are merged
    pub dedup_distance: f64,

    /// k-means iteration cap
    pub max_iterations: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_samples: sampling::MAX_SAMPLES,
            min_samples: sampling::MIN_SAMPLES,
            alpha_threshold: sampling::ALPHA_THRESHOLD,
            dedup_distance: sampling::DEDUP_DISTANCE,
            max_iterations: kmeans::MAX_ITERATIONS,
        }
    }
}

impl EngineConfig {
    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
