//! Imagery analysis algorithms
//!
//! - Spectral indices: 24 NIR-based and 6 RGB-only vegetation indices
//! - Dispatch by name: [`SpectralIndex`], [`vi`]
//! - Sanitize and rescale of index output
//! - Pansharpening: Brovey, weighted Brovey, sample mean, ESRI
//! - 8/16-bit depth conversion

mod bit_depth;
mod coerce;
mod indices;
mod pansharpen;
mod pixelwise;
mod registry;
mod rescale;
mod visible;

pub use bit_depth::{convert_16bit_to_8bit, convert_8bit_to_16bit, UINT14, UINT16, UINT8};
pub use coerce::{coerce_scalar, parse_scalar, AsBand};
pub use indices::{
    arvi, cvi, dvi, endvi, evi, evi2, gari, gci, gndvi, gosavi, grndvi, ipvi, msavi2, mtvi2,
    ndre, ndvi, ndwi, osavi, savi, sipi, sr, tdvi, tsavi, tvx, Evi2Params, EviParams,
    GariParams, GosaviParams, SaviParams, TsaviParams, NDVI_RANGE, UNIT_RANGE,
};
pub use pansharpen::{pansharpen, PansharpenMethod, PansharpenParams};
pub use registry::{vi, BandKind, IndexParams, SpectralIndex};
pub use rescale::{crop_to_bounds, rescale, sanitize, sanitize_in_place, Bounds, Scale};
pub use visible::{gli, grvi, tgi, vari, vdvi, vndvi};
