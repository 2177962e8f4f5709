//! Per-point nearest-neighbor lists

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A single neighbor with its Euclidean distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub index: usize,
    pub distance: f64,
}

impl Neighbor {
    pub fn new(index: usize, distance: f64) -> Self {
        Self { index, distance }
    }

    /// Ascending distance, ties broken by ascending index
    pub fn cmp_by_distance(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.index.cmp(&other.index))
    }
}

/// k neighbors for each of N points, stored flat
///
/// Entry i holds k distinct indices, none equal to i, sorted by
/// non-decreasing distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborList {
    k: usize,
    indices: Vec<usize>,
    distances: Vec<f64>,
}

impl NeighborList {
    /// Assemble from per-point rows, each already sorted and of length `k`
    pub fn from_rows(k: usize, rows: Vec<Vec<Neighbor>>) -> Self {
        let mut indices = Vec::with_capacity(rows.len() * k);
        let mut distances = Vec::with_capacity(rows.len() * k);
        for row in rows {
            debug_assert_eq!(row.len(), k, "neighbor row length must equal k");
            for n in row {
                indices.push(n.index);
                distances.push(n.distance);
            }
        }
        Self {
            k,
            indices,
            distances,
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn n_points(&self) -> usize {
        if self.k == 0 {
            0
        } else {
            self.indices.len() / self.k
        }
    }

    /// Neighbor indices of point `i`
    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.indices[i * self.k..(i + 1) * self.k]
    }

    /// Neighbor distances of point `i`
    pub fn distances(&self, i: usize) -> &[f64] {
        &self.distances[i * self.k..(i + 1) * self.k]
    }

    /// Iterate `(point, neighbors)`
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> + '_ {
        self.indices.chunks_exact(self.k.max(1)).enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbor_ordering_ties_by_index() {
        let a = Neighbor::new(5, 1.0);
        let b = Neighbor::new(2, 1.0);
        let c = Neighbor::new(9, 0.5);
        let mut v = vec![a, b, c];
        v.sort_by(Neighbor::cmp_by_distance);
        assert_eq!(v.iter().map(|n| n.index).collect::<Vec<_>>(), vec![9, 2, 5]);
    }

    #[test]
    fn test_flat_layout() {
        let list = NeighborList::from_rows(
            2,
            vec![
                vec![Neighbor::new(1, 1.0), Neighbor::new(2, 2.0)],
                vec![Neighbor::new(0, 1.0), Neighbor::new(2, 1.0)],
                vec![Neighbor::new(1, 1.0), Neighbor::new(0, 2.0)],
            ],
        );
        assert_eq!(list.n_points(), 3);
        assert_eq!(list.neighbors(1), &[0, 2]);
        assert_eq!(list.distances(2), &[1.0, 2.0]);
        assert_eq!(list.iter().count(), 3);
    }
}
