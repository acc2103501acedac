//! This module contains a bounded binary heap that keeps the k nearest training points.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use ordered_float::OrderedFloat; // For using f64 in BinaryHeap

/// A candidate neighbor, ordered by distance and then by training index.
#[derive(Debug, Clone, Copy)]
pub struct HeapElement {
    pub distance: OrderedFloat<f64>,
    pub index: usize,
}

impl HeapElement {
    fn key(&self) -> (OrderedFloat<f64>, usize) {
        (self.distance, self.index)
    }
}

impl PartialEq for HeapElement {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}
impl Eq for HeapElement {}

impl PartialOrd for HeapElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapElement {
    fn cmp(&self, other: &Self) -> Ordering {
        // Standard BinaryHeap is a max-heap.
        // We want to keep the K smallest keys, so the worst kept neighbor sits on top
        // and is the one evicted. Equal distances compare by index, larger index = worse.
        self.key().cmp(&other.key())
    }
}

/// Keeps the `capacity` smallest `(distance, index)` pairs seen so far.
///
/// Ties on distance go to the lower index, so the result matches a stable
/// ascending sort of all distances truncated to `capacity`.
#[derive(Debug)]
pub struct KBestNeighbors {
    capacity: usize,
    heap: BinaryHeap<HeapElement>,
}

impl KBestNeighbors {
    pub fn new(capacity: usize) -> Self {
        KBestNeighbors {
            capacity,
            heap: BinaryHeap::with_capacity(capacity.saturating_add(1).min(1024)),
        }
    }

    pub fn add(&mut self, distance: f64, index: usize) {
        if self.capacity == 0 {
            return;
        }
        let item = HeapElement { distance: OrderedFloat(distance), index };
        if self.heap.len() < self.capacity {
            self.heap.push(item); // Not full yet, keep everything
        } else if let Some(worst) = self.heap.peek() {
            // Replace the current worst only if the new point is strictly better.
            if item < *worst {
                self.heap.pop();
                self.heap.push(item);
            }
        }
    }

    /// Returns the current number of neighbors stored.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Consumes the heap, nearest first.
    pub fn into_sorted(self) -> Vec<HeapElement> {
        // into_sorted_vec is ascending, i.e. nearest first
        self.heap.into_sorted_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(best: KBestNeighbors) -> Vec<usize> {
        best.into_sorted().into_iter().map(|e| e.index).collect()
    }

    #[test]
    fn test_keeps_smallest_distances_in_order() {
        let mut best = KBestNeighbors::new(2);
        for (i, d) in [5.0, 1.0, 3.0, 0.5].into_iter().enumerate() {
            best.add(d, i);
        }
        assert_eq!(best.len(), 2);
        assert_eq!(indices(best), vec![3, 1]);
    }

    #[test]
    fn test_ties_prefer_lower_index() {
        let mut best = KBestNeighbors::new(2);
        for i in 0..4 {
            best.add(1.0, i);
        }
        assert_eq!(indices(best), vec![0, 1]);
    }

    #[test]
    fn test_capacity_larger_than_input_keeps_everything() {
        let mut best = KBestNeighbors::new(10);
        best.add(2.0, 0);
        best.add(1.0, 1);
        best.add(3.0, 2);
        assert_eq!(indices(best), vec![1, 0, 2]);
    }

    #[test]
    fn test_nan_sorts_last() {
        let mut best = KBestNeighbors::new(3);
        best.add(f64::NAN, 0);
        best.add(2.0, 1);
        best.add(1.0, 2);
        assert_eq!(indices(best), vec![2, 1, 0]);
    }

    #[test]
    fn test_zero_capacity_stays_empty() {
        let mut best = KBestNeighbors::new(0);
        best.add(1.0, 0);
        assert!(best.is_empty());
    }
}
