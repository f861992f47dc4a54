//! Distance spaces for vector similarity
//!
//! A [`Space`] fixes the dimensionality of the vectors an index accepts and
//! supplies the dissimilarity function the graph navigates by. The graph
//! engine is generic over it and never looks inside the formula.

use crate::error::{HnswError, Result};
use serde::{Deserialize, Serialize};

/// A metric space over fixed-length `f32` vectors.
///
/// `distance` must be pure, deterministic and non-negative, with smaller
/// values meaning "more similar".
pub trait Space {
    /// Dimensionality every vector in this space must have.
    fn dim(&self) -> usize;

    /// Dissimilarity between two vectors of length `dim()`.
    fn distance(&self, a: &[f32], b: &[f32]) -> f32;

    /// Check that `v` may be inserted or used as a query.
    ///
    /// The default rejects wrong lengths and non-finite components.
    fn validate(&self, v: &[f32]) -> Result<()> {
        check_shape(self.dim(), v)
    }
}

/// Reject vectors of the wrong length or with NaN/infinite components.
fn check_shape(dim: usize, v: &[f32]) -> Result<()> {
    if v.len() != dim {
        return Err(HnswError::DimensionMismatch {
            expected: dim,
            actual: v.len(),
        });
    }
    if !v.iter().all(|x| x.is_finite()) {
        return Err(HnswError::InvalidVector {
            reason: "vector contains NaN or infinite components".to_string(),
        });
    }
    Ok(())
}

/// Euclidean (L2) space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EuclideanSpace {
    dim: usize,
}

impl EuclideanSpace {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Space for EuclideanSpace {
    fn dim(&self) -> usize {
        self.dim
    }

    fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        euclidean_distance(a, b)
    }
}

/// Cosine space (distance = 1 - cosine similarity)
///
/// Zero vectors have no direction, so they are refused at validation time
/// instead of producing NaN distances inside the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CosineSpace {
    dim: usize,
}

impl CosineSpace {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Space for CosineSpace {
    fn dim(&self) -> usize {
        self.dim
    }

    fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        cosine_distance(a, b)
    }

    fn validate(&self, v: &[f32]) -> Result<()> {
        check_shape(self.dim, v)?;
        if dot_product(v, v) == 0.0 {
            return Err(HnswError::InvalidVector {
                reason: "Cannot compute cosine distance with zero vector".to_string(),
            });
        }
        Ok(())
    }
}

/// Distance metrics selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Euclidean (L2) distance
    Euclidean,
    /// Cosine similarity (converted to distance: 1 - similarity)
    Cosine,
}

impl DistanceMetric {
    /// Build a space of the given dimensionality for this metric.
    pub fn space(self, dim: usize) -> MetricSpace {
        MetricSpace { metric: self, dim }
    }
}

/// A space whose metric is chosen at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSpace {
    metric: DistanceMetric,
    dim: usize,
}

impl MetricSpace {
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }
}

impl Space for MetricSpace {
    fn dim(&self) -> usize {
        self.dim
    }

    fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        match self.metric {
            DistanceMetric::Euclidean => euclidean_distance(a, b),
            DistanceMetric::Cosine => cosine_distance(a, b),
        }
    }

    fn validate(&self, v: &[f32]) -> Result<()> {
        match self.metric {
            DistanceMetric::Euclidean => EuclideanSpace::new(self.dim).validate(v),
            DistanceMetric::Cosine => CosineSpace::new(self.dim).validate(v),
        }
    }
}

/// Compute Euclidean (L2) distance between two vectors
pub fn euclidean_distance(v1: &[f32], v2: &[f32]) -> f32 {
    v1.iter()
        .zip(v2.iter())
        .map(|(a, b)| (a - b).powi(2))
        .sum::<f32>()
        .sqrt()
}

/// Compute cosine distance between two vectors (1 - cosine similarity)
///
/// Not guarded against zero vectors: the result is NaN in that case.
pub fn cosine_distance(v1: &[f32], v2: &[f32]) -> f32 {
    let norm1 = dot_product(v1, v1).sqrt();
    let norm2 = dot_product(v2, v2).sqrt();
    let similarity = dot_product(v1, v2) / (norm1 * norm2);

    // Clamp to [-1, 1] to handle floating point errors
    1.0 - similarity.clamp(-1.0, 1.0)
}

/// Compute dot product of two vectors
pub fn dot_product(v1: &[f32], v2: &[f32]) -> f32 {
    v1.iter().zip(v2.iter()).map(|(a, b)| a * b).sum()
}
