//! RGB-only vegetation indices
//!
//! For sensors without a near-infrared channel (consumer drones, phone
//! cameras). All share the natural range [0, 1].

use super::coerce::AsBand;
use super::indices::UNIT_RANGE;
use super::pixelwise::{zip2, zip3};
use super::rescale::Scale;
use ndarray::Array2;
use vegi_core::Result;

/// Visible Normalized Difference Vegetation Index
///
/// `VNDVI = (Green - Red) / (Green + Red)`
pub fn vndvi(green: &impl AsBand, red: &impl AsBand, scale: Scale) -> Result<Array2<f32>> {
    let (green, red) = (green.to_band()?, red.to_band()?);
    let vi = zip2(&green, &red, |g, r| (g - r) / (g + r))?;
    scale.apply(vi, UNIT_RANGE)
}

/// Green Leaf Index (Louhaichi et al., 2001)
///
/// `GLI = (2 * Green - Red - Blue) / (2 * Green + Red + Blue)`
pub fn gli(
    blue: &impl AsBand,
    green: &impl AsBand,
    red: &impl AsBand,
    scale: Scale,
) -> Result<Array2<f32>> {
    let (blue, green, red) = (blue.to_band()?, green.to_band()?, red.to_band()?);
    let vi = zip3(&blue, &green, &red, excess_green_ratio)?;
    scale.apply(vi, UNIT_RANGE)
}

/// Visible Atmospherically Resistant Index (Gitelson et al., 2002)
///
/// `VARI = (Green - Red) / (Green + Red - Blue)`
pub fn vari(
    blue: &impl AsBand,
    green: &impl AsBand,
    red: &impl AsBand,
    scale: Scale,
) -> Result<Array2<f32>> {
    let (blue, green, red) = (blue.to_band()?, green.to_band()?, red.to_band()?);
    let vi = zip3(&blue, &green, &red, |b, g, r| (g - r) / (g + r - b))?;
    scale.apply(vi, UNIT_RANGE)
}

/// Visible-band Difference Vegetation Index
///
/// Same expression as [`gli`]; kept under its own name because the two
/// come from different literature and users look for both.
pub fn vdvi(
    blue: &impl AsBand,
    green: &impl AsBand,
    red: &impl AsBand,
    scale: Scale,
) -> Result<Array2<f32>> {
    let (blue, green, red) = (blue.to_band()?, green.to_band()?, red.to_band()?);
    let vi = zip3(&blue, &green, &red, excess_green_ratio)?;
    scale.apply(vi, UNIT_RANGE)
}

/// Green Red Vegetation Index
///
/// `GRVI = (Green - Red) / (Green + Red)`
pub fn grvi(green: &impl AsBand, red: &impl AsBand, scale: Scale) -> Result<Array2<f32>> {
    let (green, red) = (green.to_band()?, red.to_band()?);
    let vi = zip2(&green, &red, |g, r| (g - r) / (g + r))?;
    scale.apply(vi, UNIT_RANGE)
}

/// Triangular Greenness Index, simplified form (Hunt et al., 2013)
///
/// `TGI = Green - 0.39 * Red - 0.61 * Blue`
pub fn tgi(
    blue: &impl AsBand,
    green: &impl AsBand,
    red: &impl AsBand,
    scale: Scale,
) -> Result<Array2<f32>> {
    let (blue, green, red) = (blue.to_band()?, green.to_band()?, red.to_band()?);
    let vi = zip3(&blue, &green, &red, |b, g, r| g - 0.39 * r - 0.61 * b)?;
    scale.apply(vi, UNIT_RANGE)
}

fn excess_green_ratio(b: f32, g: f32, r: f32) -> f32 {
    (2.0 * g - r - b) / (2.0 * g + r + b)
}
