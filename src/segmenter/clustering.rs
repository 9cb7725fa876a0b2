use image::Rgb;
use rand::Rng;

use crate::Error;
use crate::Result;

/// Outcome of one clustering run
pub(crate) struct Clustering {
    /// Cluster id per filtered pixel, parallel to the input slice
    pub(crate) assignments: Vec<usize>,
    /// Representative color per cluster id
    pub(crate) centroids: Vec<Rgb<u8>>,
    pub(crate) iterations: usize,
    pub(crate) converged: bool,
}

/// Partition pixels into color clusters by iterative centroid refinement
///
/// Standard Lloyd k-means over RGB values: centroids start as random
/// member pixels, every pixel is pulled to its nearest centroid, and
/// centroids move to the mean of their members until an assignment pass
/// changes nothing. The iteration bound is a safety net, since reseeding
/// emptied clusters can keep the loop from ever settling.
pub(crate) fn cluster_colors(
    pixels: &[Rgb<u8>],
    cluster_count: usize,
    max_iterations: usize,
    rng: &mut impl Rng,
) -> Result<Clustering> {
    if cluster_count == 0 || cluster_count > pixels.len() {
        return Err(Error::InvalidClusterCount {
            requested: cluster_count,
            foreground: pixels.len(),
        });
    }

    // Initial centroids are sampled with replacement, so duplicates are
    // possible and left to drift apart on their own
    let mut centroids: Vec<Rgb<u8>> = (0..cluster_count)
        .map(|_| pixels[rng.gen_range(0..pixels.len())])
        .collect();
    let mut assignments = vec![0usize; pixels.len()];

    let mut iterations = 0;
    let mut converged = false;
    while iterations < max_iterations {
        iterations += 1;
        let changed = assign_nearest(pixels, &centroids, &mut assignments);
        update_centroids(pixels, &assignments, &mut centroids, rng);
        if !changed {
            converged = true;
            break;
        }
    }

    Ok(Clustering {
        assignments,
        centroids,
        iterations,
        converged,
    })
}

/// Assign each pixel to its nearest centroid, returning whether any
/// assignment changed
fn assign_nearest(pixels: &[Rgb<u8>], centroids: &[Rgb<u8>], assignments: &mut [usize]) -> bool {
    let mut changed = false;
    for (assignment, pixel) in assignments.iter_mut().zip(pixels) {
        let mut nearest = 0;
        let mut nearest_distance = color_distance(pixel, &centroids[0]);
        for (cluster_id, centroid) in centroids.iter().enumerate().skip(1) {
            let distance = color_distance(pixel, centroid);
            // Ties keep the lowest cluster id
            if distance < nearest_distance {
                nearest_distance = distance;
                nearest = cluster_id;
            }
        }
        if *assignment != nearest {
            *assignment = nearest;
            changed = true;
        }
    }
    changed
}

/// Move each centroid to the channel-wise mean of its members
///
/// A cluster that lost all members is reseeded with a fresh random pixel
/// instead of being left stuck on a stale color
fn update_centroids(
    pixels: &[Rgb<u8>],
    assignments: &[usize],
    centroids: &mut [Rgb<u8>],
    rng: &mut impl Rng,
) {
    let mut sums = vec![[0u64; 3]; centroids.len()];
    let mut counts = vec![0u64; centroids.len()];
    for (pixel, &cluster_id) in pixels.iter().zip(assignments) {
        counts[cluster_id] += 1;
        for channel in 0..3 {
            sums[cluster_id][channel] += pixel[channel] as u64;
        }
    }
    for (cluster_id, centroid) in centroids.iter_mut().enumerate() {
        if counts[cluster_id] > 0 {
            *centroid = Rgb([
                (sums[cluster_id][0] / counts[cluster_id]) as u8,
                (sums[cluster_id][1] / counts[cluster_id]) as u8,
                (sums[cluster_id][2] / counts[cluster_id]) as u8,
            ]);
        } else {
            *centroid = pixels[rng.gen_range(0..pixels.len())];
        }
    }
}

/// Squared euclidean distance between two colors in RGB space
fn color_distance(a: &Rgb<u8>, b: &Rgb<u8>) -> u32 {
    let dr = a[0] as i32 - b[0] as i32;
    let dg = a[1] as i32 - b[1] as i32;
    let db = a[2] as i32 - b[2] as i32;
    (dr * dr + dg * dg + db * db) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoroshiro128PlusPlus;

    fn rng() -> Xoroshiro128PlusPlus {
        Xoroshiro128PlusPlus::seed_from_u64(42)
    }

    #[test]
    fn rejects_zero_clusters() {
        let pixels = vec![Rgb([1, 2, 3])];
        let result = cluster_colors(&pixels, 0, 100, &mut rng());
        assert!(matches!(
            result,
            Err(Error::InvalidClusterCount { requested: 0, foreground: 1 })
        ));
    }

    #[test]
    fn rejects_more_clusters_than_pixels() {
        let pixels = vec![Rgb([1, 2, 3]), Rgb([4, 5, 6])];
        let result = cluster_colors(&pixels, 3, 100, &mut rng());
        assert!(matches!(
            result,
            Err(Error::InvalidClusterCount { requested: 3, foreground: 2 })
        ));
    }

    #[test]
    fn single_cluster_converges_to_truncated_mean() {
        let pixels = vec![Rgb([10, 20, 30]), Rgb([11, 21, 31]), Rgb([13, 23, 33])];
        let clustering = cluster_colors(&pixels, 1, 100, &mut rng()).unwrap();
        assert!(clustering.converged);
        assert_eq!(clustering.iterations, 1);
        assert_eq!(clustering.assignments, vec![0, 0, 0]);
        // (10 + 11 + 13) / 3 = 11 with integer truncation
        assert_eq!(clustering.centroids, vec![Rgb([11, 21, 31])]);
    }

    #[test]
    fn uniform_pixels_converge_immediately() {
        let pixels = vec![Rgb([50, 60, 70]); 8];
        let clustering = cluster_colors(&pixels, 2, 100, &mut rng()).unwrap();
        assert!(clustering.converged);
        assert_eq!(clustering.iterations, 1);
        assert!(clustering.assignments.iter().all(|&id| id < 2));
        assert!(clustering.centroids.iter().all(|c| *c == Rgb([50, 60, 70])));
    }

    #[test]
    fn same_seed_gives_same_clustering() {
        let pixels: Vec<Rgb<u8>> = (0..64u32)
            .map(|i| Rgb([(i * 4) as u8, (255 - i * 3) as u8, (i * 7 % 256) as u8]))
            .collect();
        let a = cluster_colors(&pixels, 4, 100, &mut rng()).unwrap();
        let b = cluster_colors(&pixels, 4, 100, &mut rng()).unwrap();
        assert_eq!(a.assignments, b.assignments);
        assert_eq!(a.centroids, b.centroids);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn iteration_bound_is_respected() {
        let pixels: Vec<Rgb<u8>> = (0..32u32)
            .map(|i| Rgb([(i * 8) as u8, (i * 5) as u8, (i * 3) as u8]))
            .collect();
        let clustering = cluster_colors(&pixels, 3, 2, &mut rng()).unwrap();
        assert!(clustering.iterations <= 2);
        assert_eq!(clustering.assignments.len(), pixels.len());
        assert!(clustering.assignments.iter().all(|&id| id < 3));
    }

    #[test]
    fn assignment_ties_go_to_lowest_cluster_id() {
        let pixels = vec![Rgb([100, 0, 0])];
        let centroids = vec![Rgb([90, 0, 0]), Rgb([110, 0, 0]), Rgb([100, 0, 0])];
        let mut assignments = vec![0usize; 1];
        // Centroid 2 is an exact match, centroids 0 and 1 tie at distance
        // 100; only a strictly smaller distance may steal the pixel
        assign_nearest(&pixels, &centroids, &mut assignments);
        assert_eq!(assignments, vec![2]);

        let centroids = vec![Rgb([90, 0, 0]), Rgb([110, 0, 0])];
        let mut assignments = vec![1usize; 1];
        assign_nearest(&pixels, &centroids, &mut assignments);
        assert_eq!(assignments, vec![0]);
    }

    #[test]
    fn empty_cluster_is_reseeded_from_members() {
        let pixels = vec![Rgb([10, 10, 10]), Rgb([20, 20, 20])];
        let assignments = vec![0, 0];
        let mut centroids = vec![Rgb([15, 15, 15]), Rgb([200, 200, 200])];
        update_centroids(&pixels, &assignments, &mut centroids, &mut rng());
        assert_eq!(centroids[0], Rgb([15, 15, 15]));
        // The emptied cluster must land on an actual pixel
        assert!(pixels.contains(&centroids[1]));
    }

    #[test]
    fn distance_is_squared_euclidean() {
        assert_eq!(color_distance(&Rgb([0, 0, 0]), &Rgb([1, 2, 3])), 14);
        assert_eq!(color_distance(&Rgb([255, 0, 0]), &Rgb([0, 0, 0])), 255 * 255);
        assert_eq!(color_distance(&Rgb([7, 7, 7]), &Rgb([7, 7, 7])), 0);
    }
}
