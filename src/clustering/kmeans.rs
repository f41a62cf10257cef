//! Lloyd's algorithm with k-means++ seeding, deterministic on a caller-
//! supplied seed string so reruns over the same class produce identical
//! clusters.

use super::features::squared_euclidean_distance;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const MAX_ITERATIONS: usize = 100;

#[derive(Debug, Clone)]
pub struct KMeansResult {
    pub labels: Vec<usize>,
    pub centroids: Vec<Vec<f64>>,
    pub wcss: f64,
}

/// Run k-means for a fixed `k`. Returns `None` if the assignment/update loop
/// fails to stabilize within [`MAX_ITERATIONS`]; callers treat a
/// non-converging `k` as disqualified rather than accepting a partial
/// result.
pub fn run(points: &[Vec<f64>], k: usize, seed: &str) -> Option<KMeansResult> {
    if points.is_empty() || k == 0 || k > points.len() {
        return None;
    }

    let mut rng = SeededRng::new(seed);
    let mut centroids = kmeans_plus_plus_init(points, k, &mut rng);
    let mut labels = vec![usize::MAX; points.len()];

    for _ in 0..MAX_ITERATIONS {
        let new_labels: Vec<usize> = points
            .iter()
            .map(|point| nearest_centroid(point, &centroids))
            .collect();

        let converged = new_labels == labels;
        labels = new_labels;

        if converged {
            let wcss = total_wcss(points, &labels, &centroids);
            return Some(KMeansResult {
                labels,
                centroids,
                wcss,
            });
        }

        centroids = update_centroids(points, &labels, k, points[0].len());
        // An empty cluster (no point assigned to some centroid) means this
        // k is not viable for this data; let the caller skip it.
        if centroids.len() != k {
            return None;
        }
    }

    None
}

fn nearest_centroid(point: &[f64], centroids: &[Vec<f64>]) -> usize {
    centroids
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            squared_euclidean_distance(point, a)
                .partial_cmp(&squared_euclidean_distance(point, b))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn update_centroids(points: &[Vec<f64>], labels: &[usize], k: usize, dims: usize) -> Vec<Vec<f64>> {
    let mut sums = vec![vec![0.0; dims]; k];
    let mut counts = vec![0usize; k];

    for (point, &label) in points.iter().zip(labels.iter()) {
        counts[label] += 1;
        for (d, value) in point.iter().enumerate() {
            sums[label][d] += value;
        }
    }

    let mut centroids = Vec::new();
    for cluster in 0..k {
        if counts[cluster] == 0 {
            continue;
        }
        let mean: Vec<f64> = sums[cluster]
            .iter()
            .map(|total| total / counts[cluster] as f64)
            .collect();
        centroids.push(mean);
    }
    centroids
}

fn total_wcss(points: &[Vec<f64>], labels: &[usize], centroids: &[Vec<f64>]) -> f64 {
    points
        .iter()
        .zip(labels.iter())
        .map(|(point, &label)| squared_euclidean_distance(point, &centroids[label]))
        .sum()
}

fn kmeans_plus_plus_init(points: &[Vec<f64>], k: usize, rng: &mut SeededRng) -> Vec<Vec<f64>> {
    let mut centroids = Vec::with_capacity(k);
    let first = rng.gen_range(points.len());
    centroids.push(points[first].clone());

    while centroids.len() < k {
        let weights: Vec<f64> = points
            .iter()
            .map(|point| {
                centroids
                    .iter()
                    .map(|c| squared_euclidean_distance(point, c))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();

        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            // Every remaining point coincides with an existing centroid;
            // fall back to round-robin selection to keep seeding total.
            let next = centroids.len() % points.len();
            centroids.push(points[next].clone());
            continue;
        }

        let target = rng.gen_f64() * total;
        let mut cumulative = 0.0;
        let mut chosen = points.len() - 1;
        for (i, weight) in weights.iter().enumerate() {
            cumulative += weight;
            if cumulative >= target {
                chosen = i;
                break;
            }
        }
        centroids.push(points[chosen].clone());
    }

    centroids
}

/// A small deterministic PRNG (xorshift64*) seeded from the hash of a
/// string, so clustering the same class always picks the same initial
/// centroids instead of depending on wall-clock or OS entropy.
struct SeededRng {
    state: u64,
}

impl SeededRng {
    fn new(seed: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        seed.hash(&mut hasher);
        let mut state = hasher.finish();
        if state == 0 {
            state = 0x9E3779B97F4A7C15;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545F4914F6CDD1D)
    }

    fn gen_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn gen_range(&mut self, upper_exclusive: usize) -> usize {
        if upper_exclusive == 0 {
            return 0;
        }
        (self.next_u64() as usize) % upper_exclusive
    }
}
