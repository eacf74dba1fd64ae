//! Datum transformation between WGS 84 and UTM projected systems.
//!
//! The rest of the crate only talks to [`Transformer`]; the ellipsoid, datum
//! and projection pieces are exposed for testing and benchmarking.

pub mod crs;
pub mod datum;
pub mod ellipsoid;
pub mod transformer;
pub mod transverse_mercator;

pub use crs::{Crs, UtmCrs};
pub use transformer::Transformer;
