//! Legacy averaging extractor
//!
//! Clusters every opaque pixel without sampling or deduplication, starting
//! from centroids spread evenly through the pixel list. Deterministic and
//! slower than the adaptive path; kept for callers that want the original
//! results.

use super::kmeans::{nearest_centroid, rank_clusters, Cluster};
use super::PixelBuffer;
use crate::color::HexColor;

/// Run the legacy algorithm
///
/// Returns an empty list when `k` is zero or no pixel reaches
/// `alpha_threshold`.
pub fn extract(buffer: &PixelBuffer<'_>, k: usize, alpha_threshold: u8, max_iterations: usize) -> Vec<HexColor> {
    let pixels: Vec<[f64; 3]> = buffer
        .data()
        .chunks_exact(4)
        .filter(|px| px[3] >= alpha_threshold)
        .map(|px| [px[0] as f64, px[1] as f64, px[2] as f64])
        .collect();

    if pixels.is_empty() || k == 0 {
        return Vec::new();
    }

    let k = k.min(pixels.len());
    let mut centroids: Vec<[f64; 3]> = (0..k).map(|i| pixels[i * pixels.len() / k]).collect();
    let mut assignments = vec![usize::MAX; pixels.len()];

    for _ in 0..max_iterations {
        let mut changed = false;
        for (pixel, assignment) in pixels.iter().zip(assignments.iter_mut()) {
            let nearest = nearest_centroid(pixel, &centroids);
            if *assignment != nearest {
                *assignment = nearest;
                changed = true;
            }
        }
        if !changed {
            break;
        }

        let mut sums = vec![[0.0f64; 3]; k];
        let mut counts = vec![0usize; k];
        for (pixel, &cluster) in pixels.iter().zip(&assignments) {
            for channel in 0..3 {
                sums[cluster][channel] += pixel[channel];
            }
            counts[cluster] += 1;
        }
        // Empty clusters keep their previous centroid
        for ((centroid, sum), &count) in centroids.iter_mut().zip(&sums).zip(&counts) {
            if count > 0 {
                *centroid = sum.map(|s| s / count as f64);
            }
        }
    }

    let mut populations = vec![0.0f64; k];
    for pixel in &pixels {
        populations[nearest_centroid(pixel, &centroids)] += 1.0;
    }

    let clusters: Vec<Cluster> = centroids
        .into_iter()
        .zip(populations)
        .filter(|(_, population)| *population > 0.0)
        .map(|(centroid, population)| Cluster {
            centroid,
            population,
        })
        .collect();
    rank_clusters(&clusters)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn striped(width: u32, height: u32, split: u32) -> Vec<u8> {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for _y in 0..height {
            for x in 0..width {
                if x < split {
                    data.extend_from_slice(&[16, 185, 129, 255]);
                } else {
                    data.extend_from_slice(&[239, 68, 68, 255]);
                }
            }
        }
        data
    }

    #[test]
    fn test_two_color_image() {
        let data = striped(10, 10, 7);
        let buffer = PixelBuffer::new(&data, 10, 10).unwrap();
        let colors = extract(&buffer, 2, 125, 10);
        assert_eq!(colors, vec!["#10B981", "#EF4444"]);
    }

    #[test]
    fn test_single_color_collapses() {
        let data = striped(10, 10, 10);
        let buffer = PixelBuffer::new(&data, 10, 10).unwrap();
        let colors = extract(&buffer, 3, 125, 10);
        assert_eq!(colors, vec!["#10B981"]);
    }

    #[test]
    fn test_transparent_image_is_empty() {
        let data = vec![0u8; 4 * 16];
        let buffer = PixelBuffer::new(&data, 4, 4).unwrap();
        assert!(extract(&buffer, 3, 125, 10).is_empty());
    }
}
