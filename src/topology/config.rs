//! Thresholds for the topology rules, loadable from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TopologyConfig {
    /// Polygons with |area| below this (m²) are reported as slivers.
    pub sliver_max_area: f64,
    /// Distances at or below this (m) count as touching.
    pub gap_tolerance: f64,
    /// Distances at or above this (m) count as unrelated neighbours.
    pub gap_max_distance: f64,
    /// Intersections at least this large (m²) are reported as overlaps.
    pub min_overlap_area: f64,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            sliver_max_area: 1.0,
            gap_tolerance: 0.5,
            gap_max_distance: 10.0,
            min_overlap_area: 0.1,
        }
    }
}

impl TopologyConfig {
    pub fn with_gap_tolerance(mut self, tolerance: f64) -> Self {
        self.gap_tolerance = tolerance;
        self
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = Self::from_toml_str(&std::fs::read_to_string(path)?)?;
        info!(path = %path.display(), ?config, "loaded topology config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("sliver_max_area", self.sliver_max_area),
            ("gap_tolerance", self.gap_tolerance),
            ("gap_max_distance", self.gap_max_distance),
            ("min_overlap_area", self.min_overlap_area),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.gap_max_distance <= self.gap_tolerance {
            return Err(ConfigError::Invalid(format!(
                "gap_max_distance ({}) must exceed gap_tolerance ({})",
                self.gap_max_distance, self.gap_tolerance
            )));
        }
        Ok(())
    }
}
