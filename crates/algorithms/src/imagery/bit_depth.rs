//! 8-bit / 16-bit sample depth conversion

use super::coerce::AsBand;
use ndarray::Array2;
use vegi_core::Result;

/// Full scale of an 8-bit sensor
pub const UINT8: f32 = 255.0;
/// Full scale of a 14-bit sensor (common raw camera depth)
pub const UINT14: f32 = 16383.0;
/// Full scale of a 16-bit sensor
pub const UINT16: f32 = 65535.0;

/// Clip to `[0, from]`, truncate, rescale to `to` and truncate again.
///
/// NaN samples become 0.
fn requantize(band: &Array2<f32>, from: f32, to: f32) -> Array2<f64> {
    let (from, to) = (f64::from(from), f64::from(to));
    band.mapv(|v| {
        let v = f64::from(v);
        let clipped = if v.is_nan() { 0.0 } else { v.clamp(0.0, from) };
        (clipped.trunc() / from * to).trunc().clamp(0.0, to)
    })
}

/// Stretch 8-bit counts onto the 16-bit range (255 -> 65535).
///
/// Values outside [0, 255] are clipped first.
pub fn convert_8bit_to_16bit(band: &impl AsBand) -> Result<Array2<u16>> {
    let band = band.to_band()?;
    Ok(requantize(&band, UINT8, UINT16).mapv(|v| v as u16))
}

/// Compress 16-bit counts onto the 8-bit range (65535 -> 255).
///
/// Values outside [0, 65535] are clipped first; fractional results are
/// truncated, not rounded.
pub fn convert_16bit_to_8bit(band: &impl AsBand) -> Result<Array2<u8>> {
    let band = band.to_band()?;
    Ok(requantize(&band, UINT16, UINT8).mapv(|v| v as u8))
}
