//! Undirected weighted edges
//!
//! Indices are 0-based internally; only the edge file uses 1-based indices.

use serde::{Deserialize, Serialize};

/// What an edge weight means
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightKind {
    /// Number of directions the KNN relation was observed in (1 or 2)
    Count,
    /// Jaccard overlap of closed neighborhoods, in [0, 1]
    Jaccard,
}

/// Canonical undirected edge: `source < target`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

impl Edge {
    /// Canonicalize `(a, b)`; self-loops yield `None`
    pub fn canonical(a: usize, b: usize, weight: f64) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self {
                source: a,
                target: b,
                weight,
            }),
            std::cmp::Ordering::Greater => Some(Self {
                source: b,
                target: a,
                weight,
            }),
            std::cmp::Ordering::Equal => None,
        }
    }

    #[inline]
    pub fn key(&self) -> (usize, usize) {
        (self.source, self.target)
    }
}

/// Deduplicated edges sorted by `(source, target)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeList {
    kind: WeightKind,
    edges: Vec<Edge>,
}

impl EdgeList {
    /// Wrap edges, sorting them by key
    ///
    /// Callers guarantee the edges are canonical and unique.
    pub fn new(kind: WeightKind, mut edges: Vec<Edge>) -> Self {
        edges.sort_unstable_by_key(Edge::key);
        debug_assert!(
            edges.windows(2).all(|w| w[0].key() < w[1].key()),
            "edge keys must be unique"
        );
        Self { kind, edges }
    }

    pub fn kind(&self) -> WeightKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }

    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }

    /// Weight of the undirected pair, if present
    pub fn weight(&self, a: usize, b: usize) -> Option<f64> {
        let key = if a < b { (a, b) } else { (b, a) };
        self.edges
            .binary_search_by_key(&key, Edge::key)
            .ok()
            .map(|i| self.edges[i].weight)
    }

    /// Largest node index referenced, plus one
    pub fn min_node_count(&self) -> usize {
        self.edges.iter().map(|e| e.target + 1).max().unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a EdgeList {
    type Item = &'a Edge;
    type IntoIter = std::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}
