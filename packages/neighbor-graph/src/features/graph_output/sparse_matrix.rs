//! Symmetric sparse adjacency matrix (CSR)
//!
//! Every edge (u, v, w) is stored at both (u, v) and (v, u). Columns within
//! a row are sorted, so lookups are a binary search. Unset entries read as 0.

use crate::shared::{Edge, EdgeList, WeightKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseAdjacency {
    n: usize,
    kind: WeightKind,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseAdjacency {
    /// Build an N×N symmetric matrix from canonical edges
    pub fn from_edges(n: usize, edges: &EdgeList) -> Self {
        debug_assert!(edges.min_node_count() <= n, "edge index out of range");

        let mut degree = vec![0usize; n];
        for e in edges {
            degree[e.source] += 1;
            degree[e.target] += 1;
        }

        let mut indptr = Vec::with_capacity(n + 1);
        indptr.push(0);
        for d in &degree {
            let last = *indptr.last().unwrap_or(&0);
            indptr.push(last + d);
        }

        let nnz = indptr[n];
        let mut cursor: Vec<usize> = indptr[..n].to_vec();
        let mut entries = vec![(0usize, 0.0f64); nnz];
        for e in edges {
            entries[cursor[e.source]] = (e.target, e.weight);
            cursor[e.source] += 1;
            entries[cursor[e.target]] = (e.source, e.weight);
            cursor[e.target] += 1;
        }

        for row in 0..n {
            entries[indptr[row]..indptr[row + 1]].sort_unstable_by_key(|&(col, _)| col);
        }

        let (indices, values): (Vec<usize>, Vec<f64>) = entries.into_iter().unzip();
        Self {
            n,
            kind: edges.kind(),
            indptr,
            indices,
            values,
        }
    }

    /// Matrix dimension N
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn kind(&self) -> WeightKind {
        self.kind
    }

    /// Stored entries (twice the edge count)
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Column indices and values of `row`
    pub fn row(&self, row: usize) -> (&[usize], &[f64]) {
        let range = self.indptr[row]..self.indptr[row + 1];
        (&self.indices[range.clone()], &self.values[range])
    }

    /// Entry (row, col), 0 when unset
    pub fn get(&self, row: usize, col: usize) -> f64 {
        if row >= self.n || col >= self.n {
            return 0.0;
        }
        let (cols, vals) = self.row(row);
        cols.binary_search(&col).map_or(0.0, |i| vals[i])
    }

    /// Number of stored neighbors of `row`
    pub fn degree(&self, row: usize) -> usize {
        self.indptr[row + 1] - self.indptr[row]
    }

    /// True when every stored (u, v) has an equal (v, u)
    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|row| {
            let (cols, vals) = self.row(row);
            cols.iter()
                .zip(vals.iter())
                .all(|(&col, &val)| self.get(col, row) == val)
        })
    }

    /// Upper triangle back as an edge list
    pub fn to_edge_list(&self) -> EdgeList {
        let mut edges = Vec::with_capacity(self.nnz() / 2);
        for row in 0..self.n {
            let (cols, vals) = self.row(row);
            for (&col, &weight) in cols.iter().zip(vals.iter()) {
                if col > row {
                    edges.push(Edge {
                        source: row,
                        target: col,
                        weight,
                    });
                }
            }
        }
        EdgeList::new(self.kind, edges)
    }
}
