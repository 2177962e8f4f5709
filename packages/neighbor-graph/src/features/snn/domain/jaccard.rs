//! Jaccard similarity over sorted index sets
//!
//! J(A, B) = |A ∩ B| / |A ∪ B|
//!
//! Both inputs must be sorted ascending without duplicates; the intersection
//! is a linear merge, so no hash sets are built per pair.

/// Size of the intersection of two sorted, deduplicated slices
pub fn sorted_intersection_len(a: &[usize], b: &[usize]) -> usize {
    let (mut i, mut j, mut count) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                count += 1;
                i += 1;
                j += 1;
            }
        }
    }
    count
}

/// Jaccard similarity of two sorted, deduplicated slices
///
/// Returns a value in [0.0, 1.0] where:
/// - 1.0 = identical sets (including two empty sets)
/// - 0.0 = disjoint sets
pub fn jaccard_sorted(a: &[usize], b: &[usize]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let intersection = sorted_intersection_len(a, b);
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}
