//! Test fixtures for route-planner.
//!
//! Provides realistic test data including:
//! - Porto Alegre landmark coordinates
//! - Destination builders and stand-ins for geocoding and optimization

#![allow(dead_code)]

pub mod doubles;
pub mod porto_alegre_locations;

pub use doubles::*;
pub use porto_alegre_locations::*;
