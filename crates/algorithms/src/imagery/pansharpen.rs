//! Pansharpening
//!
//! Fuses a low resolution RGB image with a co-registered, higher
//! resolution panchromatic band (already resampled to the RGB grid).
//! Results are returned unsanitized: a zero intensity sum yields NaN or
//! ±Inf exactly where the arithmetic does.

use super::coerce::AsBand;
use super::pixelwise::check_dimensions;
use ndarray::{stack, Array2, Axis};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use vegi_core::{Error, Result};

/// Pansharpening algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PansharpenMethod {
    /// Brovey transform: `channel * pan / (r + g + b)`
    SimpleBrowley,
    /// Average of each channel with pan
    SampleMean,
    /// Add `pan - mean(r, g, b)` to every channel
    Esri,
    /// Weighted Brovey: `channel * pan / (W * (r + g + b))`
    #[default]
    Browley,
}

impl PansharpenMethod {
    pub const ALL: [PansharpenMethod; 4] = [
        PansharpenMethod::SimpleBrowley,
        PansharpenMethod::SampleMean,
        PansharpenMethod::Esri,
        PansharpenMethod::Browley,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PansharpenMethod::SimpleBrowley => "simple_browley",
            PansharpenMethod::SampleMean => "sample_mean",
            PansharpenMethod::Esri => "esri",
            PansharpenMethod::Browley => "browley",
        }
    }
}

impl fmt::Display for PansharpenMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PansharpenMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        PansharpenMethod::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownMethod(s.to_string()))
    }
}

/// Parameters for [`pansharpen`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PansharpenParams {
    pub method: PansharpenMethod,
    /// Channel weight of the `browley` method (default: 0.1)
    pub weight: f32,
}

impl Default for PansharpenParams {
    fn default() -> Self {
        Self {
            method: PansharpenMethod::default(),
            weight: 0.1,
        }
    }
}

/// Sharpen `r`, `g`, `b` with `pan`.
///
/// All four bands must share one shape. Inputs are copied before any
/// arithmetic.
///
/// # Returns
/// The sharpened `(r, g, b)` channels
pub fn pansharpen(
    r: &impl AsBand,
    g: &impl AsBand,
    b: &impl AsBand,
    pan: &impl AsBand,
    params: PansharpenParams,
) -> Result<(Array2<f32>, Array2<f32>, Array2<f32>)> {
    let (mut r, mut g, mut b) = (r.to_band()?, g.to_band()?, b.to_band()?);
    let pan = pan.to_band()?;
    check_dimensions(&pan, &r)?;
    check_dimensions(&pan, &g)?;
    check_dimensions(&pan, &b)?;

    tracing::debug!(
        method = %params.method,
        rows = pan.nrows(),
        cols = pan.ncols(),
        "pansharpening"
    );

    match params.method {
        PansharpenMethod::SimpleBrowley => {
            let density = &pan / &(&r + &g + &b);
            r *= &density;
            g *= &density;
            b *= &density;
        }
        PansharpenMethod::SampleMean => {
            r = (r + &pan) * 0.5;
            g = (g + &pan) * 0.5;
            b = (b + &pan) * 0.5;
        }
        PansharpenMethod::Esri => {
            let rgb = stack(Axis(2), &[r.view(), g.view(), b.view()])
                .map_err(|e| Error::Other(e.to_string()))?;
            let mean = rgb
                .mean_axis(Axis(2))
                .ok_or_else(|| Error::Other("empty channel axis".into()))?;
            let adjust = &pan - &mean;
            r += &adjust;
            g += &adjust;
            b += &adjust;
        }
        PansharpenMethod::Browley => {
            let w = params.weight;
            let norm = &pan / &(&r * w + &g * w + &b * w);
            r *= &norm;
            g *= &norm;
            b *= &norm;
        }
    }

    Ok((r, g, b))
}
