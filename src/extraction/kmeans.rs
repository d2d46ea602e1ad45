//! Weighted k-means clustering in RGB space

use rand::Rng;
use tracing::trace;

use super::sampling::{distance_sq, WeightedColor};
use crate::color::{HexColor, Rgb};

/// A cluster centroid with the total weight assigned to it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cluster {
    pub centroid: [f64; 3],
    pub population: f64,
}

/// Index of the centroid nearest to `point`; ties go to the lowest index
pub fn nearest_centroid(point: &[f64; 3], centroids: &[[f64; 3]]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::MAX;
    for (index, centroid) in centroids.iter().enumerate() {
        let distance = distance_sq(point, centroid);
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best
}

/// k-means++ seeding: heaviest point first, then points drawn with
/// probability proportional to weight × squared distance
///
/// Returns fewer than `k` centroids when every remaining point coincides
/// with a chosen one.
fn seed_centroids<R: Rng + ?Sized>(points: &[WeightedColor], k: usize, rng: &mut R) -> Vec<[f64; 3]> {
    let mut centroids = Vec::with_capacity(k);
    let heaviest = points
        .iter()
        .enumerate()
        .fold(0, |best, (index, point)| {
            if point.weight > points[best].weight {
                index
            } else {
                best
            }
        });
    centroids.push(points[heaviest].rgb);

    while centroids.len() < k {
        let scores: Vec<f64> = points
            .iter()
            .map(|point| {
                let nearest = centroids
                    .iter()
                    .map(|c| distance_sq(&point.rgb, c))
                    .fold(f64::MAX, f64::min);
                nearest * point.weight
            })
            .collect();
        let total: f64 = scores.iter().sum();
        if total <= 0.0 {
            break;
        }

        let target = rng.gen::<f64>() * total;
        let mut cumulative = 0.0;
        let mut chosen = scores.len() - 1;
        for (index, score) in scores.iter().enumerate() {
            cumulative += score;
            if cumulative >= target && *score > 0.0 {
                chosen = index;
                break;
            }
        }
        centroids.push(points[chosen].rgb);
    }

    centroids
}

/// Cluster weighted points into at most `k` groups
///
/// Runs at most `max_iterations` assignment/update rounds and stops early
/// once no assignment changes. A centroid that loses all its points is
/// moved to the point farthest from its own centroid. Clusters come back
/// sorted by population, largest first; empty clusters are dropped.
pub fn weighted_kmeans<R: Rng + ?Sized>(
    points: &[WeightedColor],
    k: usize,
    max_iterations: usize,
    rng: &mut R,
) -> Vec<Cluster> {
    if points.is_empty() || k == 0 {
        return Vec::new();
    }

    if points.len() <= k {
        let mut clusters: Vec<Cluster> = points
            .iter()
            .map(|p| Cluster {
                centroid: p.rgb,
                population: p.weight,
            })
            .collect();
        sort_by_population(&mut clusters);
        return clusters;
    }

    let mut centroids = seed_centroids(points, k, rng);
    let mut assignments = vec![usize::MAX; points.len()];

    for iteration in 0..max_iterations {
        if !refine_step(points, &mut centroids, &mut assignments) {
            trace!(iteration, "k-means converged");
            break;
        }
    }

    let mut populations = vec![0.0f64; centroids.len()];
    for point in points {
        populations[nearest_centroid(&point.rgb, &centroids)] += point.weight;
    }

    let mut clusters: Vec<Cluster> = centroids
        .into_iter()
        .zip(populations)
        .filter(|(_, population)| *population > 0.0)
        .map(|(centroid, population)| Cluster {
            centroid,
            population,
        })
        .collect();
    sort_by_population(&mut clusters);
    clusters
}

/// One assignment/update round
///
/// Reassigns every point to its nearest centroid, moves each populated
/// centroid to the weighted mean of its points and reseeds empty clusters
/// at the point farthest from its own centroid. Returns `false` once the
/// centroids are stable: no assignment changed and nothing was reseeded.
/// A reseed always asks for another round so the centroid that gave up the
/// point is recomputed without it.
pub(crate) fn refine_step(
    points: &[WeightedColor],
    centroids: &mut [[f64; 3]],
    assignments: &mut [usize],
) -> bool {
    let mut changed = false;
    for (point, assignment) in points.iter().zip(assignments.iter_mut()) {
        let nearest = nearest_centroid(&point.rgb, centroids);
        if *assignment != nearest {
            *assignment = nearest;
            changed = true;
        }
    }

    let mut sums = vec![[0.0f64; 3]; centroids.len()];
    let mut weights = vec![0.0f64; centroids.len()];
    for (point, &cluster) in points.iter().zip(assignments.iter()) {
        for channel in 0..3 {
            sums[cluster][channel] += point.rgb[channel] * point.weight;
        }
        weights[cluster] += point.weight;
    }

    for (cluster, centroid) in centroids.iter_mut().enumerate() {
        if weights[cluster] > 0.0 {
            *centroid = sums[cluster].map(|sum| sum / weights[cluster]);
        }
    }

    for cluster in 0..centroids.len() {
        if weights[cluster] > 0.0 {
            continue;
        }
        let outlier = points
            .iter()
            .zip(assignments.iter())
            .map(|(point, &owner)| distance_sq(&point.rgb, &centroids[owner]))
            .enumerate()
            .fold((0, f64::MIN), |best, (index, distance)| {
                if distance > best.1 {
                    (index, distance)
                } else {
                    best
                }
            })
            .0;
        trace!(cluster, outlier, "reseeded empty cluster");
        centroids[cluster] = points[outlier].rgb;
        assignments[outlier] = cluster;
        changed = true;
    }

    changed
}

fn sort_by_population(clusters: &mut [Cluster]) {
    clusters.sort_by(|a, b| b.population.total_cmp(&a.population));
}

/// Round centroids to hex, merge clusters that land on the same hex, and
/// order by population, largest first
pub fn rank_clusters(clusters: &[Cluster]) -> Vec<HexColor> {
    let mut ranked: Vec<(HexColor, f64)> = Vec::with_capacity(clusters.len());
    for cluster in clusters {
        let hex = Rgb::from_f64_array(cluster.centroid).to_hex();
        match ranked.iter_mut().find(|(existing, _)| *existing == hex) {
            Some((_, population)) => *population += cluster.population,
            None => ranked.push((hex, cluster.population)),
        }
    }
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.into_iter().map(|(hex, _)| hex).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn point(r: f64, g: f64, b: f64, weight: f64) -> WeightedColor {
        WeightedColor {
            rgb: [r, g, b],
            weight,
        }
    }

    #[test]
    fn test_fewer_points_than_k() {
        let mut rng = StdRng::seed_from_u64(1);
        let points = vec![point(0.0, 0.0, 255.0, 2.0), point(255.0, 0.0, 0.0, 5.0)];
        let clusters = weighted_kmeans(&points, 3, 10, &mut rng);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].centroid, [255.0, 0.0, 0.0]);
        assert_eq!(clusters[0].population, 5.0);
    }

    #[test]
    fn test_separates_well_spaced_groups() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut points = Vec::new();
        for offset in 0..5 {
            let o = offset as f64;
            points.push(point(250.0 - o, o, o, 10.0));
            points.push(point(o, 250.0 - o, o, 4.0));
            points.push(point(o, o, 250.0 - o, 1.0));
        }

        let clusters = weighted_kmeans(&points, 3, 10, &mut rng);
        assert_eq!(clusters.len(), 3);
        assert!(clusters[0].centroid[0] > 240.0);
        assert!(clusters[1].centroid[1] > 240.0);
        assert!(clusters[2].centroid[2] > 240.0);
        assert_eq!(clusters[0].population, 50.0);
    }

    #[test]
    fn test_identical_points_yield_single_cluster() {
        let mut rng = StdRng::seed_from_u64(3);
        let points = vec![point(10.0, 20.0, 30.0, 1.0); 6];
        let clusters = weighted_kmeans(&points, 3, 10, &mut rng);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].population, 6.0);
    }

    #[test]
    fn test_empty_input() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(weighted_kmeans(&[], 3, 10, &mut rng).is_empty());
        assert!(weighted_kmeans(&[point(1.0, 1.0, 1.0, 1.0)], 0, 10, &mut rng).is_empty());
    }

    #[test]
    fn test_empty_cluster_moves_to_farthest_point() {
        let points = vec![
            point(0.0, 0.0, 0.0, 1.0),
            point(10.0, 0.0, 0.0, 1.0),
            point(200.0, 0.0, 0.0, 1.0),
        ];
        // The white centroid attracts nothing on the first pass
        let mut centroids = vec![[5.0, 0.0, 0.0], [255.0, 255.0, 255.0]];
        let mut assignments = vec![usize::MAX; points.len()];

        assert!(refine_step(&points, &mut centroids, &mut assignments));
        assert_eq!(centroids[1], [200.0, 0.0, 0.0]);
        assert_eq!(assignments, vec![0, 0, 1]);
        assert!((centroids[0][0] - 70.0).abs() < 1e-9);

        // The next round drops the far point from the first centroid
        assert!(!refine_step(&points, &mut centroids, &mut assignments));
        assert_eq!(centroids[0], [5.0, 0.0, 0.0]);
        assert_eq!(centroids[1], [200.0, 0.0, 0.0]);
        assert_eq!(assignments, vec![0, 0, 1]);
    }

    #[test]
    fn test_rank_merges_duplicate_hexes() {
        let clusters = vec![
            Cluster { centroid: [10.0, 10.0, 10.0], population: 3.0 },
            Cluster { centroid: [200.0, 0.0, 0.0], population: 4.0 },
            Cluster { centroid: [10.2, 9.9, 10.1], population: 2.0 },
        ];
        let ranked = rank_clusters(&clusters);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0], "#0A0A0A");
        assert_eq!(ranked[1], "#C80000");
    }
}
