//! Brute-force flat index — O(n) exact k-NN search

use rayon::prelude::*;

use crate::distance::Space;
use crate::error::{HnswError, Result};
use crate::hnsw::{Neighbor, PointId};
use crate::index::Index;
use crate::vector::Vector;

/// A flat (brute-force) index that computes distance to every stored vector.
///
/// Exact, so it doubles as the ground truth for recall measurements.
#[derive(Debug)]
pub struct FlatIndex<S> {
    vectors: Vec<Vector>,
    space: S,
}

impl<S: Space + Sync> FlatIndex<S> {
    /// Create a new empty flat index over the given space.
    pub fn new(space: S) -> Self {
        Self {
            vectors: Vec::new(),
            space,
        }
    }

    /// Iterate over all (id, vector) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PointId, &Vector)> {
        self.vectors.iter().enumerate().map(|(i, v)| (PointId(i), v))
    }
}

impl<S: Space + Sync> Index for FlatIndex<S> {
    fn insert(&mut self, vector: Vector) -> Result<PointId> {
        self.space.validate(vector.as_slice())?;
        self.vectors.push(vector);
        Ok(PointId(self.vectors.len() - 1))
    }

    fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        self.space.validate(query)?;
        if self.vectors.is_empty() {
            return Err(HnswError::EmptyIndex);
        }

        let mut results: Vec<Neighbor> = self
            .vectors
            .par_iter()
            .enumerate()
            .map(|(i, v)| Neighbor::new(PointId(i), self.space.distance(query, v.as_slice())))
            .collect();

        results.sort_unstable();
        results.truncate(k);
        Ok(results)
    }

    fn get_vector(&self, id: PointId) -> Option<&Vector> {
        self.vectors.get(id.index())
    }

    fn dim(&self) -> usize {
        self.space.dim()
    }

    fn len(&self) -> usize {
        self.vectors.len()
    }
}
