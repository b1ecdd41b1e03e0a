//! Planner configuration.

use serde::{Deserialize, Serialize};

use crate::cluster::DEFAULT_RADIUS_KM;
use crate::error::ConfigError;
use crate::nominatim::NominatimConfig;
use crate::osrm::OsrmConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Clustering radius in kilometers.
    pub radius_km: f64,
    /// Upper bound on concurrent geocoding calls.
    pub max_concurrency: usize,
    pub osrm: OsrmConfig,
    pub nominatim: NominatimConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            radius_km: DEFAULT_RADIUS_KM,
            max_concurrency: 8,
            osrm: OsrmConfig::default(),
            nominatim: NominatimConfig::default(),
        }
    }
}

impl PlannerConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.radius_km.is_finite() || self.radius_km <= 0.0 {
            return Err(ConfigError::Invalid {
                message: format!("radius_km must be a positive number, got {}", self.radius_km),
            });
        }
        if self.max_concurrency == 0 {
            return Err(ConfigError::Invalid {
                message: "max_concurrency must be at least 1".to_string(),
            });
        }
        for (service, timeout_secs) in [
            ("osrm", self.osrm.timeout_secs),
            ("nominatim", self.nominatim.timeout_secs),
        ] {
            if timeout_secs == 0 {
                return Err(ConfigError::Invalid {
                    message: format!("{}.timeout_secs must be at least 1", service),
                });
            }
        }
        Ok(())
    }
}
