//! HNSW (Hierarchical Navigable Small World) index module.

pub mod graph;
pub mod neighbor_queue;
pub mod params;
pub mod point;
mod select;

pub use graph::HnswGraph;
pub use neighbor_queue::Neighbor;
pub use params::HnswParams;
pub use point::PointId;

use crate::distance::{DistanceMetric, MetricSpace, Space};
use crate::error::Result;
use crate::index::Index;
use crate::vector::Vector;

/// An HNSW-based approximate nearest neighbor index.
#[derive(Debug)]
pub struct HnswIndex<S> {
    graph: HnswGraph<S>,
}

impl<S: Space> HnswIndex<S> {
    /// Create an empty index with the given beam width (ef) and max degree (M).
    /// The layer-0 degree cap is `2 * max_degree`.
    pub fn new(beam_width: usize, max_degree: usize, space: S) -> Result<Self> {
        Self::with_params(space, HnswParams::new(beam_width, max_degree))
    }

    /// Create an empty index with custom parameters.
    pub fn with_params(space: S, params: HnswParams) -> Result<Self> {
        Ok(Self {
            graph: HnswGraph::new(space, params)?,
        })
    }

    /// Insert a vector and return its handle.
    pub fn insert(&mut self, vector: impl Into<Vector>) -> Result<PointId> {
        self.graph.insert(vector.into())
    }

    /// Insert a batch of vectors in order.
    ///
    /// Every vector is validated before the first insertion, so a bad
    /// vector leaves the index untouched.
    pub fn build_batch(&mut self, vectors: Vec<Vector>) -> Result<Vec<PointId>> {
        for vector in &vectors {
            self.graph.space().validate(vector.as_slice())?;
        }
        vectors
            .into_iter()
            .map(|vector| self.graph.insert(vector))
            .collect()
    }

    /// Search for the `k` nearest neighbors of `query`, nearest first.
    pub fn search_knn(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        self.graph.search_knn(query, k)
    }

    /// Search with a specific ef value for runtime tuning.
    pub fn search_with_ef(&self, query: &[f32], k: usize, ef: usize) -> Result<Vec<Neighbor>> {
        self.graph.search_with_ef(query, k, ef)
    }

    /// Read-only access to the underlying graph.
    pub fn graph(&self) -> &HnswGraph<S> {
        &self.graph
    }
}

impl HnswIndex<MetricSpace> {
    /// Create an index whose metric is picked at runtime.
    pub fn with_metric(metric: DistanceMetric, dim: usize, params: HnswParams) -> Result<Self> {
        Self::with_params(metric.space(dim), params)
    }
}

impl<S: Space> Index for HnswIndex<S> {
    fn insert(&mut self, vector: Vector) -> Result<PointId> {
        self.graph.insert(vector)
    }

    fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        self.graph.search_knn(query, k)
    }

    fn get_vector(&self, id: PointId) -> Option<&Vector> {
        self.graph.get_vector(id)
    }

    fn dim(&self) -> usize {
        self.graph.space().dim()
    }

    fn len(&self) -> usize {
        self.graph.len()
    }
}
