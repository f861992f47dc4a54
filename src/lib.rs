//! # HNSW From Scratch
//!
//! An in-memory approximate nearest neighbor index built on a Hierarchical
//! Navigable Small World graph.
//!
//! This library provides:
//! - Pluggable distance spaces (Euclidean, Cosine)
//! - Incremental HNSW graph construction and k-NN search
//! - A brute-force flat index for exact results and recall checks
//! - A lock-guarded handle for sharing an index between threads
//!
//! ## Example
//!
//! ```rust
//! use hnsw_from_scratch::{EuclideanSpace, HnswIndex};
//!
//! // Beam width (ef) 100, max degree (M) 8, 2-D Euclidean space
//! let mut index = HnswIndex::new(100, 8, EuclideanSpace::new(2))?;
//!
//! // Insert vectors
//! let a = index.insert(vec![0.1, 0.2])?;
//! index.insert(vec![0.9, 0.8])?;
//!
//! // Search for the nearest neighbors
//! let results = index.search_knn(&[0.0, 0.0], 1)?;
//! assert_eq!(results[0].id, a);
//! # Ok::<(), hnsw_from_scratch::HnswError>(())
//! ```

pub mod distance;
pub mod error;
pub mod flat_index;
pub mod hnsw;
pub mod index;
pub mod shared;
pub mod vector;

pub use distance::{CosineSpace, DistanceMetric, EuclideanSpace, MetricSpace, Space};
pub use error::{HnswError, Result};
pub use flat_index::FlatIndex;
pub use hnsw::{HnswGraph, HnswIndex, HnswParams, Neighbor, PointId};
pub use index::Index;
pub use shared::SharedIndex;
pub use vector::Vector;
