//! Input coercion
//!
//! Every index formula starts by converting its band arguments to a
//! uniform `Array2<f32>` through [`AsBand`], so callers can pass 8-bit or
//! 16-bit counts, `f64` reflectance, rasters read from disk or literal
//! grids without a type mismatch inside the arithmetic. Conversion always
//! copies; the caller's data is never modified.

use ndarray::{Array2, ArrayBase, Data, Ix2};
use num_traits::ToPrimitive;
use vegi_core::raster::{Raster, RasterElement};
use vegi_core::{Error, Result};

/// A value that can be read as a single-precision band.
pub trait AsBand {
    /// Copy the samples into a row-major `Array2<f32>`.
    fn to_band(&self) -> Result<Array2<f32>>;
}

// Infallible for std primitives; kept fallible for exotic `ToPrimitive` types.
fn sample_to_f32<A: ToPrimitive>(value: &A, row: usize, col: usize) -> Result<f32> {
    value.to_f32().ok_or_else(|| Error::TypeConversion {
        name: format!("sample ({}, {})", row, col),
        reason: "value is not representable as f32".into(),
    })
}

fn build_band(rows: usize, cols: usize, data: Vec<f32>) -> Result<Array2<f32>> {
    Array2::from_shape_vec((rows, cols), data).map_err(|e| Error::Other(e.to_string()))
}

impl<A, S> AsBand for ArrayBase<S, Ix2>
where
    A: ToPrimitive,
    S: Data<Elem = A>,
{
    fn to_band(&self) -> Result<Array2<f32>> {
        let (rows, cols) = self.dim();
        let data = self
            .indexed_iter()
            .map(|((row, col), v)| sample_to_f32(v, row, col))
            .collect::<Result<Vec<f32>>>()?;
        build_band(rows, cols, data)
    }
}

impl<T: RasterElement> AsBand for Raster<T> {
    fn to_band(&self) -> Result<Array2<f32>> {
        self.data().to_band()
    }
}

/// Nested rows; every row must have the length of the first.
impl<T: ToPrimitive> AsBand for Vec<Vec<T>> {
    fn to_band(&self) -> Result<Array2<f32>> {
        let rows = self.len();
        let cols = self.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows * cols);
        for (row, values) in self.iter().enumerate() {
            if values.len() != cols {
                return Err(Error::SizeMismatch {
                    er: rows,
                    ec: cols,
                    ar: rows,
                    ac: values.len(),
                });
            }
            for (col, v) in values.iter().enumerate() {
                data.push(sample_to_f32(v, row, col)?);
            }
        }
        build_band(rows, cols, data)
    }
}

impl<T: ToPrimitive, const R: usize, const C: usize> AsBand for [[T; C]; R] {
    fn to_band(&self) -> Result<Array2<f32>> {
        let mut data = Vec::with_capacity(R * C);
        for (row, values) in self.iter().enumerate() {
            for (col, v) in values.iter().enumerate() {
                data.push(sample_to_f32(v, row, col)?);
            }
        }
        build_band(R, C, data)
    }
}

impl<T: AsBand + ?Sized> AsBand for &T {
    fn to_band(&self) -> Result<Array2<f32>> {
        (**self).to_band()
    }
}

/// Convert a named scalar parameter to `f32`.
///
/// Float narrowing follows IEEE casting: `1e300f64` becomes `inf` and NaN
/// stays NaN, so for the std numeric types this never fails. Only text
/// input through [`parse_scalar`] produces [`Error::TypeConversion`].
pub fn coerce_scalar<T: ToPrimitive>(name: &str, value: T) -> Result<f32> {
    value.to_f32().ok_or_else(|| Error::TypeConversion {
        name: name.to_string(),
        reason: "value is not representable as f32".into(),
    })
}

/// Parse a named scalar parameter from text, e.g. a command-line `L=0.3`.
pub fn parse_scalar(name: &str, text: &str) -> Result<f32> {
    let value: f64 = text.trim().parse().map_err(|_| Error::TypeConversion {
        name: name.to_string(),
        reason: format!("'{}' is not a number", text),
    })?;
    coerce_scalar(name, value)
}
