//! Configuration parameters for the HNSW index.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HnswError, Result};

/// Configuration parameters for the HNSW index.
///
/// Deserializes from JSON with every field optional; missing fields fall
/// back to [`HnswParams::default`] and a missing `max_degree0` is derived
/// as `2 * max_degree`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HnswParams {
    /// Size of the dynamic candidate list (ef) for insertion and search.
    pub beam_width: usize,
    /// Max number of connections per node (layers > 0).
    pub max_degree: usize,
    /// Max connections at layer 0 (typically 2 * max_degree).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_degree0: Option<usize>,
    /// Maximum number of layers.
    pub max_level: usize,
    /// Seed for level generation; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for HnswParams {
    fn default() -> Self {
        Self {
            beam_width: 100,
            max_degree: 8,
            max_degree0: None,
            max_level: 16,
            seed: None,
        }
    }
}

impl HnswParams {
    pub fn new(beam_width: usize, max_degree: usize) -> Self {
        Self {
            beam_width,
            max_degree,
            ..Self::default()
        }
    }

    /// Fix the RNG seed so level assignment is reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Effective layer-0 degree cap.
    pub fn max_degree0(&self) -> usize {
        self.max_degree0
            .unwrap_or_else(|| self.max_degree.saturating_mul(2))
    }

    /// Level generation factor: 1 / ln(max_degree).
    pub fn ml(&self) -> f64 {
        1.0 / (self.max_degree as f64).ln()
    }

    pub fn validate(&self) -> Result<()> {
        if self.beam_width == 0 {
            return Err(HnswError::InvalidParameter {
                name: "beam_width",
                reason: "must be positive".to_string(),
            });
        }
        if self.max_degree < 2 {
            return Err(HnswError::InvalidParameter {
                name: "max_degree",
                reason: format!("must be at least 2, got {}", self.max_degree),
            });
        }
        if self.max_degree0() < self.max_degree {
            return Err(HnswError::InvalidParameter {
                name: "max_degree0",
                reason: format!(
                    "must be at least max_degree ({}), got {}",
                    self.max_degree,
                    self.max_degree0()
                ),
            });
        }
        if self.max_level == 0 {
            return Err(HnswError::InvalidParameter {
                name: "max_level",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Parse and validate parameters from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let params: HnswParams =
            serde_json::from_str(json).map_err(|e| HnswError::Config(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// Read and validate parameters from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let params = HnswParams::default();
        assert_eq!(params.beam_width, 100);
        assert_eq!(params.max_degree, 8);
        assert_eq!(params.max_degree0(), 16);
        assert_relative_eq!(params.ml(), 1.0 / 8f64.ln());
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            HnswParams::new(0, 8).validate(),
            Err(HnswError::InvalidParameter {
                name: "beam_width",
                ..
            })
        ));
        assert!(matches!(
            HnswParams::new(10, 1).validate(),
            Err(HnswError::InvalidParameter {
                name: "max_degree",
                ..
            })
        ));
        let params = HnswParams {
            max_level: 0,
            ..HnswParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_huge_max_degree_saturates() {
        let params = HnswParams::new(16, usize::MAX);
        assert_eq!(params.max_degree0(), usize::MAX);
        assert!(params.validate().is_ok());
        assert!(params.ml() > 0.0);
    }

    #[test]
    fn test_from_json_partial() {
        let params = HnswParams::from_json_str(r#"{"max_degree": 4, "seed": 7}"#).unwrap();
        assert_eq!(params.max_degree, 4);
        assert_eq!(params.max_degree0(), 8);
        assert_eq!(params.beam_width, 100);
        assert_eq!(params.seed, Some(7));
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            HnswParams::from_json_str(r#"{"beam_width": 0}"#),
            Err(HnswError::InvalidParameter { .. })
        ));
        assert!(matches!(
            HnswParams::from_json_str("not json"),
            Err(HnswError::Config(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"beam_width": 32, "max_degree": 6, "max_degree0": 10}}"#).unwrap();

        let params = HnswParams::from_file(file.path()).unwrap();
        assert_eq!(params.beam_width, 32);
        assert_eq!(params.max_degree0(), 10);
    }

    #[test]
    fn test_from_missing_file() {
        assert!(matches!(
            HnswParams::from_file("/definitely/not/here.json"),
            Err(HnswError::Io(_))
        ));
    }
}
