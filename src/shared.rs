//! Thread-shared HNSW index.
//!
//! The graph itself is single-threaded: `insert` takes `&mut self`. This
//! wrapper puts one `RwLock` around the whole index so searches run
//! concurrently with each other while insertions are exclusive. It is a
//! coarse discipline; there is no per-point locking.

use std::sync::{Arc, RwLock};

use crate::distance::Space;
use crate::error::{HnswError, Result};
use crate::hnsw::{HnswIndex, Neighbor, PointId};
use crate::vector::Vector;

/// A cloneable handle to an index shared between threads.
#[derive(Debug)]
pub struct SharedIndex<S> {
    inner: Arc<RwLock<HnswIndex<S>>>,
}

impl<S> Clone for SharedIndex<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Space> SharedIndex<S> {
    pub fn new(index: HnswIndex<S>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    /// Insert under the write lock.
    pub fn insert(&self, vector: impl Into<Vector>) -> Result<PointId> {
        let mut index = self.inner.write().map_err(|_| HnswError::LockPoisoned)?;
        index.insert(vector)
    }

    /// Search under the read lock.
    pub fn search_knn(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        let index = self.inner.read().map_err(|_| HnswError::LockPoisoned)?;
        index.search_knn(query, k)
    }

    pub fn search_with_ef(&self, query: &[f32], k: usize, ef: usize) -> Result<Vec<Neighbor>> {
        let index = self.inner.read().map_err(|_| HnswError::LockPoisoned)?;
        index.search_with_ef(query, k, ef)
    }

    pub fn len(&self) -> Result<usize> {
        let index = self.inner.read().map_err(|_| HnswError::LockPoisoned)?;
        Ok(index.graph().len())
    }
}
