//! Property-based tests against both index backends.

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use vectorlite_core::{Index, Metric, Vector};
use vectorlite_index::{BruteForceIndex, HnswConfig, HnswIndex};

fn arb_vector(dim: usize) -> impl Strategy<Value = Vector> {
    proptest::collection::vec(-100.0f64..100.0, dim).prop_map(Vector::new)
}

proptest! {
    /// After n insertions, ids are exactly 1..n in insertion order.
    #[test]
    fn id_monotonicity(vectors in proptest::collection::vec(arb_vector(4), 1..30)) {
        let mut index = BruteForceIndex::new();
        for (i, vector) in vectors.into_iter().enumerate() {
            let id = index.add_entry(vector, HashMap::new());
            prop_assert_eq!(id.get(), (i + 1) as u64);
        }
    }

    /// Brute-force query returns exactly the set sorted by ascending
    /// distance_score, truncated to k.
    #[test]
    fn brute_force_matches_manual_ranking(
        vectors in proptest::collection::vec(arb_vector(3), 1..20),
        query in arb_vector(3),
        k in 1usize..25,
    ) {
        let mut index = BruteForceIndex::new();
        for vector in &vectors {
            index.add_entry(vector.clone(), HashMap::new());
        }

        let mut expected: Vec<(u64, f64)> = vectors
            .iter()
            .enumerate()
            .map(|(i, v)| ((i + 1) as u64, v.distance_score(&query, Metric::Cosine)))
            .collect();
        expected.sort_by(|a, b| a.1.total_cmp(&b.1));
        expected.truncate(k);
        let expected_ids: HashSet<u64> = expected.into_iter().map(|(id, _)| id).collect();

        let results = index.query(&query, k, Metric::Cosine);
        let actual_ids: HashSet<u64> = results.iter().map(|r| r.entry.id.get()).collect();
        prop_assert_eq!(actual_ids, expected_ids);
    }

    /// Connections are always symmetric across every layer.
    #[test]
    fn hnsw_connections_are_symmetric(vectors in proptest::collection::vec(arb_vector(4), 1..60)) {
        let mut index = HnswIndex::with_rng(HnswConfig::balanced(), StdRng::seed_from_u64(1));
        for vector in vectors {
            index.add_entry(vector, HashMap::new());
        }
        prop_assert!(index.is_symmetric());
    }

    /// No node exceeds M connections on any layer.
    #[test]
    fn hnsw_respects_degree_bound(vectors in proptest::collection::vec(arb_vector(4), 1..60)) {
        let config = HnswConfig::balanced();
        let mut index = HnswIndex::with_rng(config, StdRng::seed_from_u64(2));
        for vector in vectors {
            index.add_entry(vector, HashMap::new());
        }
        prop_assert!(index.max_degree() <= config.m);
    }

    /// No node is connected to itself on any layer.
    #[test]
    fn hnsw_has_no_self_loops(vectors in proptest::collection::vec(arb_vector(4), 1..60)) {
        let mut index = HnswIndex::with_rng(HnswConfig::balanced(), StdRng::seed_from_u64(3));
        for vector in vectors {
            index.add_entry(vector, HashMap::new());
        }
        prop_assert!(!index.has_self_loop());
    }

    /// The entry node always has the maximal layer in the graph.
    #[test]
    fn hnsw_entry_node_is_maximal(vectors in proptest::collection::vec(arb_vector(4), 1..60)) {
        let mut index = HnswIndex::with_rng(HnswConfig::balanced(), StdRng::seed_from_u64(4));
        for vector in vectors {
            index.add_entry(vector, HashMap::new());
        }
        prop_assert!(index.entry_node_is_maximal());
    }

    /// Fixing the RNG seed makes insertion order produce a bit-identical
    /// graph across independent runs.
    #[test]
    fn hnsw_is_deterministic_under_seed(vectors in proptest::collection::vec(arb_vector(4), 1..40)) {
        let mut a = HnswIndex::with_rng(HnswConfig::balanced(), StdRng::seed_from_u64(99));
        let mut b = HnswIndex::with_rng(HnswConfig::balanced(), StdRng::seed_from_u64(99));
        for vector in &vectors {
            a.add_entry(vector.clone(), HashMap::new());
            b.add_entry(vector.clone(), HashMap::new());
        }
        prop_assert_eq!(a.connection_fingerprint(), b.connection_fingerprint());
    }
}

/// Level assignment decays monotonically — level 0 is the most common,
/// then level 1, then level 2.
#[test]
fn level_distribution_decays_monotonically() {
    let config = HnswConfig::balanced();
    let mut rng = StdRng::seed_from_u64(1234);
    let mut counts = [0u32; 3];

    for _ in 0..10_000 {
        let level = HnswIndex::sample_level_with(&mut rng, config.m_l);
        if level < counts.len() {
            counts[level] += 1;
        }
    }

    assert!(counts[0] > counts[1], "level 0 ({}) should outnumber level 1 ({})", counts[0], counts[1]);
    assert!(counts[1] > counts[2], "level 1 ({}) should outnumber level 2 ({})", counts[1], counts[2]);
}

#[test]
fn empty_index_queries_are_empty_for_both_backends() {
    let brute = BruteForceIndex::new();
    let hnsw = HnswIndex::new(HnswConfig::balanced());
    let query = Vector::new(vec![1.0, 0.0, 0.0]);
    assert!(brute.query(&query, 5, Metric::Cosine).is_empty());
    assert!(hnsw.query(&query, 5, Metric::Cosine).is_empty());
}

#[test]
fn single_vector_index_returns_itself() {
    let mut brute = BruteForceIndex::new();
    let id = brute.add_entry(Vector::new(vec![1.0, 2.0, 3.0]), HashMap::new());
    let results = brute.query(&Vector::new(vec![1.0, 2.0, 3.0]), 5, Metric::Cosine);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].entry.id, id);
    assert!(results[0].score.abs() < 1e-9);
}

#[test]
fn all_scores_are_finite() {
    let mut index = BruteForceIndex::new();
    for i in 0..20 {
        index.add_entry(Vector::new(vec![i as f64, (i * 2) as f64]), HashMap::new());
    }
    let results = index.query(&Vector::new(vec![3.0, 3.0]), 20, Metric::Cosine);
    assert!(results.iter().all(|r| r.score.is_finite()));
}
