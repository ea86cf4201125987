//! Hierarchical Navigable Small World index.
//!
//! Nodes live in a flat arena (`Vec<Node>`) addressed by position, so the
//! graph has no cyclic ownership to fight the borrow checker over. Internal
//! scoring is cosine-only regardless of the metric a query is eventually
//! ranked by — construction and layer search always compare raw cosine
//! similarity; only the outer `query` boundary re-ranks by the caller's
//! requested metric.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use vectorlite_core::{Entry, EntryId, Index, Metric, ScoredEntry, Vector};
use std::collections::HashMap;

type NodeId = usize;

/// HNSW construction/search parameters, also used as the engine's ambient
/// defaults.
#[derive(Debug, Clone, Copy)]
pub struct HnswConfig {
    /// Maximum connections per node per layer above layer 0.
    pub m: usize,
    /// Candidate list size used while inserting.
    pub ef_construction: usize,
    /// Candidate list size used while querying layer 0.
    pub ef_search: usize,
    /// Level-generation parameter `m_L`.
    pub m_l: f64,
}

impl HnswConfig {
    /// Balanced defaults: `M=16`, `ef_construction=200`, `ef_search` equal
    /// to `ef_construction`, `m_L = 1/ln(2)`.
    #[must_use]
    pub fn balanced() -> Self {
        Self {
            m: 16,
            ef_construction: 200,
            ef_search: 200,
            m_l: 1.0 / 2.0_f64.ln(),
        }
    }
}

impl Default for HnswConfig {
    fn default() -> Self {
        Self::balanced()
    }
}

#[derive(Debug, Clone, Copy)]
struct CandidateNode {
    node: NodeId,
    score: f64,
}

#[derive(Debug)]
struct Node {
    entry_id: EntryId,
    vector: Vector,
    metadata: HashMap<String, String>,
    max_layer: usize,
    connections: Vec<Vec<NodeId>>,
}

/// HNSW graph index. Construction is driven entirely by cosine similarity;
/// the `metric` passed to `query` only affects how the final candidate set
/// is re-ranked.
pub struct HnswIndex {
    nodes: Vec<Node>,
    entry_node: Option<NodeId>,
    next_id: u64,
    m: usize,
    ef_construction: usize,
    ef_search: usize,
    m_l: f64,
    rng: StdRng,
}

impl HnswIndex {
    /// Creates an empty index with a non-deterministic RNG.
    #[must_use]
    pub fn new(config: HnswConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates an empty index with an injected RNG, for deterministic
    /// construction in tests.
    #[must_use]
    pub fn with_rng(config: HnswConfig, rng: StdRng) -> Self {
        Self {
            nodes: Vec::new(),
            entry_node: None,
            next_id: 1,
            m: config.m,
            ef_construction: config.ef_construction,
            ef_search: config.ef_search,
            m_l: config.m_l,
            rng,
        }
    }

    /// Samples a new node's max layer: `floor(-ln(U · m_L))`, clamped at 0.
    fn sample_level(&mut self) -> usize {
        // `gen_range(0.0..1.0)` includes 0.0; clamp away from it so `U` stays
        // in the open interval `(0,1)` the spec calls for — at `U = 0`,
        // `-ln(U · m_L)` is `+inf` and `level.floor() as usize` would
        // saturate to `usize::MAX`, overflowing the `max_layer + 1` below.
        let u: f64 = self.rng.gen_range(0.0..1.0).max(f64::MIN_POSITIVE);
        let level = -(u * self.m_l).ln();
        if level < 0.0 {
            0
        } else {
            level.floor() as usize
        }
    }

    fn connect(&mut self, a: NodeId, b: NodeId, layer: usize) {
        assert_ne!(
            a, b,
            "HNSW invariant violation: attempted to connect a node to itself"
        );
        if !self.nodes[a].connections[layer].contains(&b) {
            self.nodes[a].connections[layer].push(b);
        }
        if !self.nodes[b].connections[layer].contains(&a) {
            self.nodes[b].connections[layer].push(a);
        }
    }

    fn disconnect(&mut self, a: NodeId, b: NodeId, layer: usize) {
        self.nodes[a].connections[layer].retain(|&id| id != b);
        self.nodes[b].connections[layer].retain(|&id| id != a);
    }

    /// Greedy bounded-beam search of a single layer, returning up to
    /// `num_closest` nodes ordered by descending cosine similarity to
    /// `query_vector`.
    fn search_layer(
        &self,
        query_vector: &Vector,
        entry_points: &[NodeId],
        layer: usize,
        num_closest: usize,
    ) -> Vec<NodeId> {
        if num_closest == 0 {
            return Vec::new();
        }

        let mut candidates: Vec<CandidateNode> = entry_points
            .iter()
            .map(|&id| CandidateNode {
                node: id,
                score: query_vector.cosine_similarity(&self.nodes[id].vector),
            })
            .collect();
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

        let mut visited: HashSet<NodeId> = HashSet::new();

        loop {
            let current = match candidates.iter().find(|c| !visited.contains(&c.node)).copied() {
                Some(c) => c,
                None => break,
            };

            // current candidate is worse than our worst kept result: done.
            if candidates.len() >= num_closest && current.score < candidates[num_closest - 1].score
            {
                break;
            }

            visited.insert(current.node);

            let neighbors: Vec<NodeId> = self.nodes[current.node]
                .connections
                .get(layer)
                .cloned()
                .unwrap_or_default();

            for neighbor in neighbors {
                if visited.contains(&neighbor) {
                    continue;
                }
                let neighbor_score = query_vector.cosine_similarity(&self.nodes[neighbor].vector);

                let mut updated = false;
                if candidates.len() == num_closest {
                    let worst_score = candidates[candidates.len() - 1].score;
                    if neighbor_score > worst_score {
                        candidates.pop();
                        candidates.push(CandidateNode {
                            node: neighbor,
                            score: neighbor_score,
                        });
                        updated = true;
                    }
                } else {
                    candidates.push(CandidateNode {
                        node: neighbor,
                        score: neighbor_score,
                    });
                    updated = true;
                }

                // TODO: keep candidates sorted on insert instead of re-sorting here.
                if updated {
                    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
                }
            }
        }

        candidates.into_iter().map(|c| c.node).collect()
    }

    /// Connects `new_id` to `existent_id` at `layer`, replacing the
    /// existing node's weakest connection if it's already at capacity and
    /// the new node scores better.
    fn create_connection(&mut self, new_id: NodeId, existent_id: NodeId, layer: usize) {
        let existent_len = self.nodes[existent_id].connections[layer].len();
        if existent_len < self.m {
            self.connect(existent_id, new_id, layer);
            return;
        }

        let existent_vector = self.nodes[existent_id].vector.clone();
        self.nodes[existent_id].connections[layer].sort_by(|&a, &b| {
            let score_a = existent_vector.cosine_similarity(&self.nodes[a].vector);
            let score_b = existent_vector.cosine_similarity(&self.nodes[b].vector);
            score_b.total_cmp(&score_a)
        });

        let weakest = self.nodes[existent_id].connections[layer][self.m - 1];
        let score_new = existent_vector.cosine_similarity(&self.nodes[new_id].vector);
        let score_weakest = existent_vector.cosine_similarity(&self.nodes[weakest].vector);

        if score_new > score_weakest {
            self.disconnect(existent_id, weakest, layer);
            self.connect(existent_id, new_id, layer);
        }
    }
}

impl Index for HnswIndex {
    #[tracing::instrument(skip(self, vector, metadata), fields(dim = vector.dimension()))]
    fn add_entry(&mut self, vector: Vector, metadata: HashMap<String, String>) -> EntryId {
        let entry_id = EntryId::new(self.next_id);
        self.next_id += 1;

        let max_layer = self.sample_level();
        let new_vector = vector.clone();
        let new_id = self.nodes.len();
        self.nodes.push(Node {
            entry_id,
            vector,
            metadata,
            max_layer,
            connections: vec![Vec::new(); max_layer + 1],
        });

        let Some(old_entry) = self.entry_node else {
            self.entry_node = Some(new_id);
            return entry_id;
        };

        let mut entry_points = vec![old_entry];
        let mut current_layer = self.nodes[old_entry].max_layer;

        // Rapid descent to the new node's top layer.
        while current_layer > max_layer {
            entry_points = self.search_layer(&new_vector, &entry_points, current_layer, 1);
            current_layer -= 1;
        }

        loop {
            entry_points =
                self.search_layer(&new_vector, &entry_points, current_layer, self.ef_construction);

            let connect_to: Vec<NodeId> = if entry_points.len() > self.m {
                entry_points[..self.m].to_vec()
            } else {
                entry_points.clone()
            };
            for existent in connect_to {
                self.create_connection(new_id, existent, current_layer);
            }

            if current_layer == 0 {
                break;
            }
            current_layer -= 1;
        }

        if self.nodes[old_entry].max_layer < max_layer {
            self.entry_node = Some(new_id);
        }

        tracing::debug!(entry_id = %entry_id, max_layer, "hnsw node inserted");
        entry_id
    }

    #[tracing::instrument(skip(self, query), fields(k, metric = metric.as_str()))]
    fn query(&self, query: &Vector, k: usize, metric: Metric) -> Vec<ScoredEntry> {
        if k == 0 || self.nodes.is_empty() {
            return Vec::new();
        }

        let entry_node = self.entry_node.expect("non-empty index has an entry node");
        let mut entry_points = vec![entry_node];
        let mut layer = self.nodes[entry_node].max_layer;

        while layer > 0 {
            entry_points = self.search_layer(query, &entry_points, layer, 1);
            layer -= 1;
        }

        let ef = self.ef_search.max(k);
        let candidates = self.search_layer(query, &entry_points, 0, ef);

        let mut scored: Vec<ScoredEntry> = candidates
            .into_iter()
            .map(|id| {
                let node = &self.nodes[id];
                ScoredEntry {
                    entry: Entry::new(node.entry_id, node.vector.clone(), node.metadata.clone()),
                    score: node.vector.distance_score(query, metric),
                }
            })
            .collect();

        scored.sort_by(|a, b| a.score.total_cmp(&b.score));
        scored.truncate(k);
        scored
    }

    fn list_entries(&self) -> Vec<Entry> {
        self.nodes
            .iter()
            .map(|n| Entry::new(n.entry_id, n.vector.clone(), n.metadata.clone()))
            .collect()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// Graph-invariant introspection used by the property tests. Not part of
/// the `Index` contract.
impl HnswIndex {
    /// Samples one level without needing a whole index, for testing the
    /// level-distribution's decay shape in isolation.
    #[must_use]
    pub fn sample_level_with(rng: &mut StdRng, m_l: f64) -> usize {
        let u: f64 = rng.gen_range(0.0..1.0).max(f64::MIN_POSITIVE);
        let level = -(u * m_l).ln();
        if level < 0.0 {
            0
        } else {
            level.floor() as usize
        }
    }

    /// True iff every edge is mirrored on both endpoints.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        for (id, node) in self.nodes.iter().enumerate() {
            for (layer, neighbors) in node.connections.iter().enumerate() {
                for &neighbor in neighbors {
                    if !self.nodes[neighbor].connections[layer].contains(&id) {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// The largest per-layer degree across the whole graph.
    #[must_use]
    pub fn max_degree(&self) -> usize {
        self.nodes
            .iter()
            .flat_map(|n| n.connections.iter().map(Vec::len))
            .max()
            .unwrap_or(0)
    }

    /// True iff any node is connected to itself on any layer.
    #[must_use]
    pub fn has_self_loop(&self) -> bool {
        self.nodes
            .iter()
            .enumerate()
            .any(|(id, node)| node.connections.iter().any(|layer| layer.contains(&id)))
    }

    /// True iff the entry node's max layer is the maximum over all nodes.
    #[must_use]
    pub fn entry_node_is_maximal(&self) -> bool {
        match self.entry_node {
            None => true,
            Some(entry) => {
                let top = self.nodes.iter().map(|n| n.max_layer).max().unwrap_or(0);
                self.nodes[entry].max_layer == top
            }
        }
    }

    /// A deterministic summary of the graph's edges, for asserting bit-for-
    /// bit identical construction under a fixed seed.
    #[must_use]
    pub fn connection_fingerprint(&self) -> Vec<(EntryId, usize, Vec<EntryId>)> {
        self.nodes
            .iter()
            .enumerate()
            .flat_map(|(id, node)| {
                node.connections.iter().enumerate().map(move |(layer, neighbors)| {
                    let mut ids: Vec<EntryId> =
                        neighbors.iter().map(|&n| self.nodes[n].entry_id).collect();
                    ids.sort_by_key(EntryId::get);
                    (self.nodes[id].entry_id, layer, ids)
                })
            })
            .collect()
    }
}
