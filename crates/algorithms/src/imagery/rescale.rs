//! Sanitize and rescale
//!
//! Division-based indices legitimately divide by zero (a fully black pixel
//! has `NIR + Red == 0`), which yields NaN or ±Inf. These never reach the
//! caller: every formula result passes through [`Scale::apply`], which
//! replaces non-finite samples with 0, optionally remaps `[low, high]`
//! onto `[0, 1]` and optionally clips to hard bounds.

use super::pixelwise::for_each_sample;
use ndarray::Array2;
use vegi_core::{Error, Result};

/// Optional hard limits.
///
/// In [`rescale`] the same pair serves as the reference range that
/// decides whether the affine step runs, and, when both ends are set, as
/// the clip range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min: Option<f32>,
    pub max: Option<f32>,
}

impl Bounds {
    /// No limits
    pub const NONE: Bounds = Bounds {
        min: None,
        max: None,
    };

    pub fn new(min: f32, max: f32) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Both limits, if both are set
    pub fn limits(&self) -> Option<(f32, f32)> {
        self.min.zip(self.max)
    }

    fn matches(&self, low: f32, high: f32) -> bool {
        self.min == Some(low) && self.max == Some(high)
    }
}

/// Replace every NaN and ±Inf sample with `replacement`.
pub fn sanitize(mut array: Array2<f32>, replacement: f32) -> Array2<f32> {
    sanitize_in_place(&mut array, replacement);
    array
}

pub fn sanitize_in_place(array: &mut Array2<f32>, replacement: f32) {
    for_each_sample(array, |v| {
        if !v.is_finite() {
            *v = replacement;
        }
    });
}

/// Raise samples below `low` to `low` and lower samples above `high` to `high`.
pub fn crop_to_bounds(array: &mut Array2<f32>, low: f32, high: f32) {
    for_each_sample(array, |v| {
        if *v < low {
            *v = low;
        }
        if *v > high {
            *v = high;
        }
    });
}

/// Sanitize, remap `[low, high]` onto `[0, 1]` unless `(low, high)` equals
/// `bounds`, then clip to `bounds` when both ends are set.
///
/// # Errors
/// [`Error::InvalidRange`] when the remap is needed and `low == high`.
pub fn rescale(array: Array2<f32>, low: f32, high: f32, bounds: Bounds) -> Result<Array2<f32>> {
    rescale_against(array, low, high, bounds, bounds)
}

/// Core of [`rescale`] with the no-op reference range and the clip range
/// given separately.
fn rescale_against(
    mut array: Array2<f32>,
    low: f32,
    high: f32,
    reference: Bounds,
    clip: Bounds,
) -> Result<Array2<f32>> {
    sanitize_in_place(&mut array, 0.0);

    if !reference.matches(low, high) {
        if high == low {
            return Err(Error::InvalidRange { low, high });
        }
        let span = high - low;
        for_each_sample(&mut array, |v| {
            let scaled = (*v - low) / span;
            *v = if scaled.is_finite() { scaled } else { 0.0 };
        });
    }

    if let Some((min, max)) = clip.limits() {
        crop_to_bounds(&mut array, min, max);
    }

    Ok(array)
}

/// Output scaling of one index call.
///
/// `low`/`high` default to the index's natural range, in which case the
/// affine step is skipped and the result is only sanitized. `clip` is off
/// by default, so extreme inputs may produce values outside the range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scale {
    pub low: Option<f32>,
    pub high: Option<f32>,
    pub clip: Bounds,
}

impl Scale {
    /// Remap `[low, high]` onto `[0, 1]`
    pub fn range(low: f32, high: f32) -> Self {
        Self {
            low: Some(low),
            high: Some(high),
            clip: Bounds::NONE,
        }
    }

    /// Clip the result to `[min, max]` after any remap
    pub fn clipped(mut self, min: f32, max: f32) -> Self {
        self.clip = Bounds::new(min, max);
        self
    }

    /// Sanitize and scale a formula result whose natural range is `natural`.
    pub fn apply(&self, array: Array2<f32>, natural: (f32, f32)) -> Result<Array2<f32>> {
        let (natural_low, natural_high) = natural;
        rescale_against(
            array,
            self.low.unwrap_or(natural_low),
            self.high.unwrap_or(natural_high),
            Bounds::new(natural_low, natural_high),
            self.clip,
        )
    }
}
