//! Bounded max-heap of the k best candidates seen so far
//!
//! Candidates are ordered by `(squared distance, index)`, so the retained set
//! does not depend on the order points are visited in.

use crate::shared::Neighbor;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy)]
struct Entry {
    dist_sq: f64,
    index: usize,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist_sq
            .total_cmp(&other.dist_sq)
            .then_with(|| self.index.cmp(&other.index))
    }
}

#[derive(Debug, Clone)]
pub struct CandidateHeap {
    k: usize,
    heap: BinaryHeap<Entry>,
}

impl CandidateHeap {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            heap: BinaryHeap::with_capacity(k + 1),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.k
    }

    /// Squared distance a new candidate must not exceed; infinite until full
    #[inline]
    pub fn worst(&self) -> f64 {
        if self.is_full() {
            self.heap.peek().map_or(f64::INFINITY, |e| e.dist_sq)
        } else {
            f64::INFINITY
        }
    }

    /// Offer a candidate
    #[inline]
    pub fn push(&mut self, index: usize, dist_sq: f64) {
        if self.k == 0 {
            return;
        }
        let entry = Entry { dist_sq, index };
        if !self.is_full() {
            self.heap.push(entry);
        } else if let Some(top) = self.heap.peek() {
            if entry < *top {
                self.heap.pop();
                self.heap.push(entry);
            }
        }
    }

    /// Neighbors sorted by ascending distance, distances un-squared
    pub fn into_sorted(self) -> Vec<Neighbor> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|e| Neighbor::new(e.index, e.dist_sq.sqrt()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_k_smallest() {
        let mut heap = CandidateHeap::new(3);
        for (i, d) in [9.0, 1.0, 4.0, 16.0, 0.25, 4.0].iter().enumerate() {
            heap.push(i, *d);
        }
        let out = heap.into_sorted();
        assert_eq!(out.iter().map(|n| n.index).collect::<Vec<_>>(), vec![4, 1, 2]);
        assert_eq!(out[0].distance, 0.5);
    }

    #[test]
    fn test_ties_resolved_by_index_regardless_of_order() {
        let mut a = CandidateHeap::new(2);
        let mut b = CandidateHeap::new(2);
        for i in [7, 3, 5, 1] {
            a.push(i, 1.0);
        }
        for i in [1, 5, 3, 7] {
            b.push(i, 1.0);
        }
        let a: Vec<_> = a.into_sorted().iter().map(|n| n.index).collect();
        let b: Vec<_> = b.into_sorted().iter().map(|n| n.index).collect();
        assert_eq!(a, vec![1, 3]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_worst_infinite_until_full() {
        let mut heap = CandidateHeap::new(2);
        heap.push(0, 1.0);
        assert_eq!(heap.worst(), f64::INFINITY);
        heap.push(1, 2.0);
        assert_eq!(heap.worst(), 2.0);
        assert!(heap.is_full());
    }
}
