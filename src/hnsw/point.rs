//! Graph nodes and their handles.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::vector::Vector;

/// Handle to a point stored in an index, assigned in insertion order.
///
/// Identity is the handle, never the vector contents: two points with equal
/// coordinates are still distinct nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PointId(pub usize);

impl PointId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node in the HNSW graph.
#[derive(Debug, Clone)]
pub(crate) struct Point {
    vector: Vector,
    /// Neighbors per layer. neighbors[l] is the adjacency list at layer l.
    neighbors: Vec<Vec<PointId>>,
}

impl Point {
    /// Create a point that participates in layers `0..=level`.
    pub(crate) fn new(vector: Vector, level: usize) -> Self {
        Self {
            vector,
            neighbors: vec![Vec::new(); level + 1],
        }
    }

    pub(crate) fn vector(&self) -> &Vector {
        &self.vector
    }

    /// The maximum layer this point was inserted into.
    pub(crate) fn level(&self) -> usize {
        self.neighbors.len() - 1
    }

    /// Adjacency at `layer`; empty above the point's level.
    pub(crate) fn neighbors(&self, layer: usize) -> &[PointId] {
        self.neighbors.get(layer).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn push_neighbor(&mut self, layer: usize, id: PointId) {
        if let Some(list) = self.neighbors.get_mut(layer) {
            list.push(id);
        }
    }

    /// Overwrite the adjacency at `layer` wholesale.
    pub(crate) fn set_neighbors(&mut self, layer: usize, ids: Vec<PointId>) {
        if let Some(list) = self.neighbors.get_mut(layer) {
            *list = ids;
        }
    }
}
