//! route-planner
//!
//! Orders a day's delivery destinations into a multi-stop route: resolve
//! coordinates, group nearby stops, order the groups from the origin and let
//! an external optimizer sequence each group.

pub mod traits;
pub mod error;
pub mod cache;
pub mod cancel;
pub mod resolver;
pub mod map_link;
pub mod nominatim;
pub mod haversine;
pub mod cluster;
pub mod optimizer;
pub mod osrm;
pub mod plan;
pub mod planner;
pub mod config;
pub mod source;
