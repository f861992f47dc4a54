//! Index trait for pluggable search backends

use crate::error::Result;
use crate::hnsw::{Neighbor, PointId};
use crate::vector::Vector;

/// A search index that supports insertion and k-NN search.
///
/// Points are identified by the [`PointId`] handed out at insertion,
/// assigned densely in insertion order.
pub trait Index {
    /// Add a vector and return its handle.
    fn insert(&mut self, vector: Vector) -> Result<PointId>;

    /// Search for the `k` nearest neighbors of `query`.
    /// Returns at most `k` neighbors sorted by distance ascending.
    fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>>;

    /// Retrieve a vector by its handle.
    fn get_vector(&self, id: PointId) -> Option<&Vector>;

    /// Dimensionality of the vectors this index accepts.
    fn dim(&self) -> usize;

    /// The number of vectors in this index.
    fn len(&self) -> usize;

    /// Whether the index is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
