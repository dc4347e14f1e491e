//! In-memory entity model for GeoJSON `Feature` and `FeatureCollection` objects.
//!
//! Codecs never construct or inspect entities directly. They go through an
//! [`EntityFactory`], so a different entity representation can be swapped in by
//! supplying a different factory.

pub mod entity;
pub mod factory;
mod utils;

pub use entity::*;
pub use factory::*;
