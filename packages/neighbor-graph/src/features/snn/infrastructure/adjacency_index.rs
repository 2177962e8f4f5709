//! Closed-neighborhood index
//!
//! CSR layout: row v lists N⁺(v) = {v} ∪ {u : (u, v) is an edge}, sorted
//! ascending. Built once and shared read-only across workers.

use crate::shared::EdgeList;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedNeighborhoods {
    offsets: Vec<usize>,
    members: Vec<usize>,
}

impl ClosedNeighborhoods {
    /// Build for `n_nodes` nodes; edge weights are ignored
    pub fn build(n_nodes: usize, edges: &EdgeList) -> Self {
        // Self plus one slot per incident edge
        let mut degree = vec![1usize; n_nodes];
        for e in edges {
            degree[e.source] += 1;
            degree[e.target] += 1;
        }

        let mut offsets = Vec::with_capacity(n_nodes + 1);
        offsets.push(0);
        for d in &degree {
            let last = *offsets.last().unwrap_or(&0);
            offsets.push(last + d);
        }

        let mut cursor: Vec<usize> = offsets[..n_nodes].to_vec();
        let mut members = vec![0usize; offsets[n_nodes]];
        for (v, slot) in cursor.iter_mut().enumerate() {
            members[*slot] = v;
            *slot += 1;
        }
        for e in edges {
            members[cursor[e.source]] = e.target;
            cursor[e.source] += 1;
            members[cursor[e.target]] = e.source;
            cursor[e.target] += 1;
        }

        for v in 0..n_nodes {
            members[offsets[v]..offsets[v + 1]].sort_unstable();
        }

        Self { offsets, members }
    }

    pub fn n_nodes(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Sorted closed neighborhood of `v`
    #[inline]
    pub fn of(&self, v: usize) -> &[usize] {
        &self.members[self.offsets[v]..self.offsets[v + 1]]
    }

    /// Nodes `w > u` whose closed neighborhood intersects N⁺(u)
    ///
    /// These are exactly the nodes within two hops of `u`.
    pub fn two_hop_above(&self, u: usize) -> Vec<usize> {
        let mut out: Vec<usize> = self
            .of(u)
            .iter()
            .flat_map(|&x| self.of(x).iter().copied())
            .filter(|&w| w > u)
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{Edge, WeightKind};

    fn path(n: usize) -> EdgeList {
        EdgeList::new(
            WeightKind::Count,
            (0..n - 1)
                .map(|i| Edge::canonical(i, i + 1, 1.0).unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_closed_neighborhoods_of_path() {
        let idx = ClosedNeighborhoods::build(4, &path(4));
        assert_eq!(idx.n_nodes(), 4);
        assert_eq!(idx.of(0), &[0, 1]);
        assert_eq!(idx.of(1), &[0, 1, 2]);
        assert_eq!(idx.of(3), &[2, 3]);
    }

    #[test]
    fn test_isolated_node_contains_itself() {
        let idx = ClosedNeighborhoods::build(5, &path(3));
        assert_eq!(idx.of(4), &[4]);
    }

    #[test]
    fn test_two_hop_above() {
        let idx = ClosedNeighborhoods::build(5, &path(5));
        assert_eq!(idx.two_hop_above(0), vec![1, 2]);
        assert_eq!(idx.two_hop_above(2), vec![3, 4]);
        assert!(idx.two_hop_above(4).is_empty());
    }
}
