//! Dominant color extraction from raster images
//!
//! Two algorithms are available:
//! - **Adaptive** (default): stride sampling bounded by a sample cap,
//!   near-duplicate merging into weighted points, then k-means++ seeded
//!   weighted clustering.
//! - **Legacy**: plain k-means over every opaque pixel.
//!
//! Both return colors ordered by how much of the image they cover. An
//! image without opaque pixels yields an empty list rather than an error.

pub mod kmeans;
pub mod legacy;
pub mod sampling;

use image::RgbaImage;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::HexColor;
use crate::config::ExtractionConfig;
use crate::{PaletteError, Result};

pub use kmeans::{weighted_kmeans, Cluster};
pub use sampling::WeightedColor;

/// Borrowed RGBA8 pixel data, row-major
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap raw RGBA bytes
    ///
    /// # Errors
    ///
    /// Returns `PaletteError::InvalidParameter` if `data` is not exactly
    /// `width × height × 4` bytes long
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| PaletteError::invalid_parameter("dimensions", format!("{}x{}", width, height)))?;
        if data.len() != expected {
            return Err(PaletteError::invalid_parameter(
                "data",
                format!("{} bytes, expected {} for {}x{} RGBA", data.len(), expected, width, height),
            ));
        }
        Ok(Self { data, width, height })
    }

    /// Borrow a decoded image
    pub fn from_image(image: &'a RgbaImage) -> Self {
        Self {
            data: image.as_raw(),
            width: image.width(),
            height: image.height(),
        }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len() / 4
    }
}

/// Extraction algorithm selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionAlgorithm {
    #[default]
    Adaptive,
    Legacy,
}

/// Configured color extractor
#[derive(Debug, Clone, Default)]
pub struct ColorExtractor {
    config: ExtractionConfig,
    algorithm: ExtractionAlgorithm,
}

impl ColorExtractor {
    /// Create an adaptive extractor with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExtractionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn algorithm(mut self, algorithm: ExtractionAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Extract up to `k` dominant colors, most dominant first
    ///
    /// The legacy algorithm ignores `rng`.
    pub fn extract<R: Rng + ?Sized>(&self, buffer: &PixelBuffer<'_>, k: usize, rng: &mut R) -> Vec<HexColor> {
        let colors = match self.algorithm {
            ExtractionAlgorithm::Adaptive => self.extract_adaptive(buffer, k, rng),
            ExtractionAlgorithm::Legacy => {
                legacy::extract(buffer, k, self.config.alpha_threshold, self.config.max_iterations)
            }
        };

        if colors.is_empty() {
            debug!(
                width = buffer.width(),
                height = buffer.height(),
                "no colors extracted from image"
            );
        }
        colors
    }

    fn extract_adaptive<R: Rng + ?Sized>(&self, buffer: &PixelBuffer<'_>, k: usize, rng: &mut R) -> Vec<HexColor> {
        if k == 0 {
            return Vec::new();
        }

        let samples = sampling::sample_pixels(buffer, &self.config);
        let points = sampling::deduplicate(&samples, self.config.dedup_distance);
        let clusters = weighted_kmeans(&points, k, self.config.max_iterations, rng);
        let colors = kmeans::rank_clusters(&clusters);

        debug!(
            pixels = buffer.pixel_count(),
            samples = samples.len(),
            unique = points.len(),
            clusters = clusters.len(),
            colors = colors.len(),
            "extracted dominant colors"
        );
        colors
    }
}

/// Extract up to `k` dominant colors with the adaptive algorithm
pub fn extract_colors<R: Rng + ?Sized>(buffer: &PixelBuffer<'_>, k: usize, rng: &mut R) -> Vec<HexColor> {
    ColorExtractor::new().extract(buffer, k, rng)
}

/// Extract up to `k` dominant colors with the legacy algorithm
pub fn extract_colors_legacy(buffer: &PixelBuffer<'_>, k: usize) -> Vec<HexColor> {
    let config = ExtractionConfig::default();
    legacy::extract(buffer, k, config.alpha_threshold, config.max_iterations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{hex_to_rgb, normalize_hex};
    use image::Rgba;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Three horizontal bands with slight per-pixel noise
    fn banded_image() -> RgbaImage {
        RgbaImage::from_fn(40, 40, |x, y| {
            let noise = ((x + y) % 4) as u8;
            if y < 24 {
                Rgba([220 + noise, 30, 30, 255])
            } else if y < 34 {
                Rgba([30, 30 + noise, 220, 255])
            } else {
                Rgba([30, 200, 60 + noise, 255])
            }
        })
    }

    #[test]
    fn test_buffer_length_is_checked() {
        let data = vec![0u8; 15];
        assert!(matches!(
            PixelBuffer::new(&data, 2, 2),
            Err(PaletteError::InvalidParameter { .. })
        ));
        assert!(PixelBuffer::new(&[], 0, 0).is_ok());
    }

    #[test]
    fn test_single_color_image() {
        let image = RgbaImage::from_pixel(10, 10, Rgba([59, 130, 246, 255]));
        let buffer = PixelBuffer::from_image(&image);
        let mut rng = StdRng::seed_from_u64(42);

        let colors = extract_colors(&buffer, 3, &mut rng);
        assert!(!colors.is_empty() && colors.len() <= 3);
        assert_eq!(colors[0], "#3B82F6");

        let legacy = extract_colors_legacy(&buffer, 3);
        assert_eq!(legacy[0], "#3B82F6");
    }

    #[test]
    fn test_bands_are_ordered_by_coverage() {
        let image = banded_image();
        let buffer = PixelBuffer::from_image(&image);
        let mut rng = StdRng::seed_from_u64(1);

        let colors = extract_colors(&buffer, 3, &mut rng);
        assert_eq!(colors.len(), 3);

        let expected = ["#DD1E1E", "#1E20DC", "#1EC83E"];
        for (color, wanted) in colors.iter().zip(expected) {
            let got = hex_to_rgb(color).to_f64_array();
            let want = hex_to_rgb(&normalize_hex(wanted).unwrap()).to_f64_array();
            assert!(sampling::distance_sq(&got, &want) < 16.0, "{color} vs {wanted}");
        }
    }

    #[test]
    fn test_adaptive_is_reproducible() {
        let image = banded_image();
        let buffer = PixelBuffer::from_image(&image);
        let first = extract_colors(&buffer, 5, &mut StdRng::seed_from_u64(9));
        let second = extract_colors(&buffer, 5, &mut StdRng::seed_from_u64(9));
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_results() {
        let transparent = RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 0]));
        let buffer = PixelBuffer::from_image(&transparent);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(extract_colors(&buffer, 3, &mut rng).is_empty());
        assert!(extract_colors_legacy(&buffer, 3).is_empty());

        let opaque = RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255]));
        let buffer = PixelBuffer::from_image(&opaque);
        assert!(extract_colors(&buffer, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_extractor_selects_algorithm() {
        let image = banded_image();
        let buffer = PixelBuffer::from_image(&image);
        let mut rng = StdRng::seed_from_u64(2);

        let legacy = ColorExtractor::new()
            .algorithm(ExtractionAlgorithm::Legacy)
            .extract(&buffer, 3, &mut rng);
        assert_eq!(legacy, extract_colors_legacy(&buffer, 3));
        assert_eq!(legacy.len(), 3);
    }

    #[test]
    fn test_iteration_cap_still_returns_colors() {
        let image = banded_image();
        let buffer = PixelBuffer::from_image(&image);
        let config = ExtractionConfig {
            max_iterations: 1,
            ..ExtractionConfig::default()
        };
        let colors = ColorExtractor::with_config(config).extract(&buffer, 3, &mut StdRng::seed_from_u64(3));
        assert!(!colors.is_empty() && colors.len() <= 3);
    }
}
