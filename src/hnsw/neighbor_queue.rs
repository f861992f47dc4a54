//! Priority queue utilities for HNSW — handles f32 ordering for BinaryHeap.
//!
//! Search keeps two heaps over the same [`Neighbor`] entries: a
//! [`MinFrontier`] of candidates still to expand (closest on top) and a
//! [`CappedMaxResult`] holding the best `capacity` results seen so far
//! (furthest on top, so the acceptance threshold is a peek away).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::point::PointId;

/// A neighbor entry with a distance and a point handle.
#[derive(Debug, Clone, Copy)]
pub struct Neighbor {
    pub distance: f32,
    pub id: PointId,
}

impl Neighbor {
    pub fn new(id: PointId, distance: f32) -> Self {
        Self { distance, id }
    }
}

impl PartialEq for Neighbor {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Neighbor {}

// Default ordering: by distance, so BinaryHeap<Neighbor> is a max-heap
// with the furthest entry on top.
impl PartialOrd for Neighbor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Neighbor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// A wrapper that reverses Neighbor ordering to create a min-heap.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct Reversed(Neighbor);

impl PartialOrd for Reversed {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Reversed {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.cmp(&self.0)
    }
}

/// Nearest-first frontier of candidates still to be expanded.
#[derive(Debug, Default)]
pub struct MinFrontier {
    heap: BinaryHeap<Reversed>,
}

impl MinFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, n: Neighbor) {
        self.heap.push(Reversed(n));
    }

    pub fn pop(&mut self) -> Option<Neighbor> {
        self.heap.pop().map(|r| r.0)
    }
}

/// Farthest-first result set that never holds more than `capacity` entries.
#[derive(Debug)]
pub struct CappedMaxResult {
    heap: BinaryHeap<Neighbor>,
    capacity: usize,
}

impl CappedMaxResult {
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::new(),
            capacity,
        }
    }

    /// Push and pop the furthest if size exceeds capacity, keeping only
    /// the closest `capacity` neighbors.
    pub fn push(&mut self, n: Neighbor) {
        self.heap.push(n);
        if self.heap.len() > self.capacity {
            self.heap.pop();
        }
    }

    /// The worst (furthest) retained entry.
    pub fn furthest(&self) -> Option<&Neighbor> {
        self.heap.peek()
    }

    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.capacity
    }

    /// Whether a candidate at `distance` would be kept by `push`.
    pub fn admits(&self, distance: f32) -> bool {
        if !self.is_full() {
            return true;
        }
        match self.furthest() {
            Some(worst) => distance < worst.distance,
            None => false,
        }
    }

    /// Drain into a sorted Vec (ascending by distance).
    pub fn into_sorted_vec(self) -> Vec<Neighbor> {
        self.heap.into_sorted_vec()
    }
}
