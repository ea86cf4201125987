//! Recall of HNSW against the brute-force oracle.

use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use vectorlite_core::{Index, Metric, Vector};
use vectorlite_index::{BruteForceIndex, HnswConfig, HnswIndex};

fn random_vector(rng: &mut StdRng, dim: usize) -> Vector {
    Vector::new((0..dim).map(|_| rng.gen_range(-1.0..1.0)).collect())
}

/// Builds matching brute-force and HNSW indexes over the same random
/// dataset and returns the recall@10 for one query, averaged as a fraction
/// in [0, 1].
fn recall_at_10(seed: u64, n: usize, dim: usize) -> f64 {
    let mut data_rng = StdRng::seed_from_u64(seed);
    let mut brute = BruteForceIndex::new();
    let mut hnsw = HnswIndex::with_rng(HnswConfig::balanced(), StdRng::seed_from_u64(seed.wrapping_add(1)));

    for _ in 0..n {
        let vector = random_vector(&mut data_rng, dim);
        brute.add_entry(vector.clone(), HashMap::new());
        hnsw.add_entry(vector, HashMap::new());
    }

    let query = random_vector(&mut data_rng, dim);
    let exact: HashSet<_> = brute
        .query(&query, 10, Metric::Cosine)
        .into_iter()
        .map(|r| r.entry.id)
        .collect();
    let approx: HashSet<_> = hnsw
        .query(&query, 10, Metric::Cosine)
        .into_iter()
        .map(|r| r.entry.id)
        .collect();

    exact.intersection(&approx).count() as f64 / exact.len().max(1) as f64
}

/// `M=16, ef_construction=200`, 1,000 vectors of dimension 32: HNSW should
/// recover at least 8 of the true top-10 on average across a batch of
/// trials (sampled at a smaller trial count than a full statistical run to
/// keep the suite fast).
#[test]
fn recall_floor_holds_on_moderate_dataset() {
    let trials = 20;
    let total: f64 = (0..trials).map(|i| recall_at_10(1000 + i, 1000, 32)).sum();
    let average = total / trials as f64;
    assert!(
        average >= 0.8,
        "average recall@10 was {average:.2}, expected >= 0.80"
    );
}

#[test]
fn recall_is_reasonable_on_small_dataset() {
    let average = recall_at_10(42, 100, 16);
    assert!(average >= 0.8, "recall@10 on 100 vectors was {average:.2}");
}
