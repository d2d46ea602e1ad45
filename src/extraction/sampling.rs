//! Adaptive pixel sampling and near-duplicate merging

use std::collections::HashMap;

use super::PixelBuffer;
use crate::color::Rgb;
use crate::config::ExtractionConfig;

/// A color with the number of samples it stands for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedColor {
    /// Mean RGB of the merged samples, 0-255 per channel
    pub rgb: [f64; 3],
    pub weight: f64,
}

impl WeightedColor {
    fn absorb(&mut self, rgb: [f64; 3]) {
        let total = self.weight + 1.0;
        for (channel, value) in self.rgb.iter_mut().zip(rgb) {
            *channel += (value - *channel) / total;
        }
        self.weight = total;
    }
}

/// Squared Euclidean distance in RGB
pub fn distance_sq(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Pixel stride that bounds work on large images
///
/// Targets `max_samples` reads, but never strides so far that fewer than
/// `min_samples` pixels are read when the image has that many.
pub fn sampling_stride(total: usize, config: &ExtractionConfig) -> usize {
    let mut stride = (total / config.max_samples.max(1)).max(1);
    if total >= config.min_samples && config.min_samples > 0 {
        stride = stride.min((total / config.min_samples).max(1));
    }
    stride
}

/// Read every `stride`-th pixel, skipping those below the alpha threshold
pub fn sample_pixels(buffer: &PixelBuffer<'_>, config: &ExtractionConfig) -> Vec<Rgb> {
    let total = buffer.pixel_count();
    if total == 0 {
        return Vec::new();
    }

    let stride = sampling_stride(total, config);
    buffer
        .data()
        .chunks_exact(4)
        .step_by(stride)
        .filter(|px| px[3] >= config.alpha_threshold)
        .map(|px| Rgb::new(px[0], px[1], px[2]))
        .collect()
}

type CellKey = [i32; 3];

/// Grid cell of a color for cells `cell` units wide
fn cell_of(rgb: &[f64; 3], cell: f64) -> CellKey {
    rgb.map(|c| (c / cell).floor() as i32)
}

/// Merge samples closer than `max_distance` into weighted points
///
/// Points are indexed in a grid whose cells are at least `max_distance`
/// wide, so a sample only needs comparing against its own cell and the 26
/// neighbors. When several points are in range the earliest one absorbs
/// the sample. Output order follows the first occurrence of each point.
pub fn deduplicate(samples: &[Rgb], max_distance: f64) -> Vec<WeightedColor> {
    let threshold = max_distance * max_distance;
    let cell = max_distance.ceil().max(1.0);
    let mut points: Vec<WeightedColor> = Vec::new();
    let mut grid: HashMap<CellKey, Vec<usize>> = HashMap::new();

    for sample in samples {
        let rgb = sample.to_f64_array();
        let key = cell_of(&rgb, cell);

        let mut existing: Option<usize> = None;
        for dr in -1..=1 {
            for dg in -1..=1 {
                for db in -1..=1 {
                    let neighbor = [key[0] + dr, key[1] + dg, key[2] + db];
                    let Some(indices) = grid.get(&neighbor) else {
                        continue;
                    };
                    for &index in indices {
                        if distance_sq(&points[index].rgb, &rgb) <= threshold
                            && existing.map_or(true, |best| index < best)
                        {
                            existing = Some(index);
                        }
                    }
                }
            }
        }

        match existing {
            Some(index) => points[index].absorb(rgb),
            None => {
                grid.entry(key).or_default().push(points.len());
                points.push(WeightedColor { rgb, weight: 1.0 });
            }
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stride_bounds() {
        let config = ExtractionConfig::default();
        assert_eq!(sampling_stride(100, &config), 1);
        assert_eq!(sampling_stride(10_000, &config), 1);
        assert_eq!(sampling_stride(1_000_000, &config), 100);

        let tight = ExtractionConfig {
            max_samples: 10,
            min_samples: 500,
            ..ExtractionConfig::default()
        };
        // The floor wins over the cap
        assert_eq!(sampling_stride(1_000, &tight), 2);
    }

    #[test]
    fn test_transparent_pixels_are_skipped() {
        let data = [
            255, 0, 0, 255, //
            0, 255, 0, 0, //
            0, 0, 255, 124, //
            0, 0, 255, 125,
        ];
        let buffer = PixelBuffer::new(&data, 2, 2).unwrap();
        let samples = sample_pixels(&buffer, &ExtractionConfig::default());
        assert_eq!(samples, vec![Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)]);
    }

    #[test]
    fn test_deduplicate_merges_close_colors() {
        let samples = vec![
            Rgb::new(200, 10, 10),
            Rgb::new(202, 12, 9),
            Rgb::new(10, 10, 200),
            Rgb::new(201, 11, 10),
        ];
        let points = deduplicate(&samples, 10.0);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].weight, 3.0);
        assert!((points[0].rgb[0] - 201.0).abs() < 1e-9);
        assert_eq!(points[1].weight, 1.0);
    }

    #[test]
    fn test_deduplicate_merges_across_cell_edges() {
        let points = deduplicate(&[Rgb::new(15, 100, 100), Rgb::new(16, 100, 100)], 10.0);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].weight, 2.0);

        let corner = deduplicate(&[Rgb::new(29, 29, 29), Rgb::new(31, 31, 31)], 10.0);
        assert_eq!(corner.len(), 1);

        // Wider thresholds widen the grid with them
        let wide = deduplicate(&[Rgb::new(0, 0, 0), Rgb::new(18, 0, 0)], 20.0);
        assert_eq!(wide.len(), 1);
    }

    #[test]
    fn test_deduplicate_keeps_distant_colors() {
        let samples = vec![Rgb::new(0, 0, 0), Rgb::new(12, 0, 0)];
        assert_eq!(deduplicate(&samples, 10.0).len(), 2);
        assert!(deduplicate(&[], 10.0).is_empty());
    }
}
