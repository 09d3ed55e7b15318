//! # Vegi Core
//!
//! Core types and I/O shared by the vegi spectral index library.
//!
//! This crate provides:
//! - `Raster<T>`: band grid with georeferencing metadata
//! - `GeoTransform`: affine transformation for georeferencing
//! - `Error` / `Result`: the error type every vegi crate returns
//! - Native GeoTIFF reading and writing

pub mod error;
pub mod io;
pub mod raster;

pub use error::{Error, Result};
pub use raster::{GeoTransform, Raster, RasterElement};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::raster::{GeoTransform, Raster, RasterElement};
}
