//! Configuration for observation feature extraction.

use serde::{Deserialize, Serialize};

use super::queries::DEFAULT_FIRE_RANGE;

/// Scaling and geometry used when turning an observation into features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Side length of the square board.
    pub map_size: i32,
    /// Straight-line reach used for the enemy-in-range flags.
    pub fire_range: i32,
    /// Divisor applied to ship and planet counts.
    pub count_scale: f32,
    /// Divisor applied to the resource counter.
    pub resource_scale: f32,
    /// Value written in place of coordinates that could not be found.
    pub missing_coord: f32,
}

impl FeatureConfig {
    pub fn map_extent(&self) -> f32 {
        self.map_size as f32
    }
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            map_size: 100,
            fire_range: DEFAULT_FIRE_RANGE,
            count_scale: 10.0,
            resource_scale: 100.0,
            missing_coord: -1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = FeatureConfig::default();
        assert!(cfg.map_size > 0);
        assert!(cfg.fire_range > 0);
        assert!(cfg.count_scale > 0.0);
        assert!(cfg.missing_coord < 0.0);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: FeatureConfig = serde_json::from_str(r#"{"fire_range": 5}"#).unwrap();
        assert_eq!(cfg.fire_range, 5);
        assert_eq!(cfg.map_size, 100);
    }
}
