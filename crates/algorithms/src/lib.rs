//! # Vegi Algorithms
//!
//! Vegetation indices and pansharpening for multispectral imagery.
//!
//! ## Available Algorithm Categories
//!
//! - **imagery**: Spectral indices, name dispatch, rescaling,
//!   pansharpening, bit depth conversion
//!
//! Bands may be any 2D `ndarray` of primitive numbers, a
//! [`Raster`](vegi_core::Raster), nested `Vec`s or fixed-size arrays; every
//! entry point copies them to `f32` first.

mod maybe_rayon;

pub mod imagery;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::imagery::{
        evi, gndvi, ndvi, ndwi, osavi, pansharpen, savi, vi, AsBand, Bounds, EviParams,
        IndexParams, PansharpenMethod, PansharpenParams, SaviParams, Scale, SpectralIndex,
    };
    pub use vegi_core::prelude::*;
}
