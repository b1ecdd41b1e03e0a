//! Error types for planning runs and external collaborators.

use thiserror::Error;

/// Failure of a whole `compute_route` run.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("nothing to plan: no resolvable destinations ({unresolved} unresolved)")]
    NothingToPlan { unresolved: usize },

    #[error("invalid origin coordinate ({lon}, {lat})")]
    InvalidOrigin { lon: f64, lat: f64 },

    #[error("planning run was cancelled")]
    Cancelled,

    #[error("destination source failed: {0}")]
    Source(#[from] SourceError),
}

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("geocoder returned an unparseable coordinate: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum OptimizeError {
    #[error("optimization request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("optimizer rejected the request: {code}")]
    Rejected { code: String },

    #[error("malformed optimizer response: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
#[error("destination source error: {message}")]
pub struct SourceError {
    pub message: String,
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {message}")]
    Invalid { message: String },

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// A manual reorder that was declined. The plan is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReorderRejected {
    #[error("cannot move anchor stop at index {index}")]
    AnchorMove { index: usize },

    #[error("index {index} is out of bounds for a plan of {len} stops")]
    OutOfBounds { index: usize, len: usize },
}
