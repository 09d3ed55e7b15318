//! Row-parallel per-pixel kernels shared by the index formulas

use crate::maybe_rayon::*;
use ndarray::Array2;
use vegi_core::{Error, Result};

pub(crate) fn check_dimensions(a: &Array2<f32>, b: &Array2<f32>) -> Result<()> {
    if a.dim() != b.dim() {
        return Err(Error::SizeMismatch {
            er: a.nrows(),
            ec: a.ncols(),
            ar: b.nrows(),
            ac: b.ncols(),
        });
    }
    Ok(())
}

/// Evaluate `f(row, col)` for every cell of a `rows x cols` grid.
fn evaluate<F>(shape: (usize, usize), f: F) -> Result<Array2<f32>>
where
    F: Fn(usize, usize) -> f32 + Sync + Send,
{
    let (rows, cols) = shape;
    let data: Vec<f32> = (0..rows)
        .into_par_iter()
        .flat_map(|row| (0..cols).map(|col| f(row, col)).collect::<Vec<f32>>())
        .collect();

    Array2::from_shape_vec((rows, cols), data).map_err(|e| Error::Other(e.to_string()))
}

pub(crate) fn zip2<F>(a: &Array2<f32>, b: &Array2<f32>, f: F) -> Result<Array2<f32>>
where
    F: Fn(f32, f32) -> f32 + Sync + Send,
{
    check_dimensions(a, b)?;
    evaluate(a.dim(), |row, col| f(a[[row, col]], b[[row, col]]))
}

pub(crate) fn zip3<F>(a: &Array2<f32>, b: &Array2<f32>, c: &Array2<f32>, f: F) -> Result<Array2<f32>>
where
    F: Fn(f32, f32, f32) -> f32 + Sync + Send,
{
    check_dimensions(a, b)?;
    check_dimensions(a, c)?;
    evaluate(a.dim(), |row, col| {
        f(a[[row, col]], b[[row, col]], c[[row, col]])
    })
}

pub(crate) fn zip4<F>(
    a: &Array2<f32>,
    b: &Array2<f32>,
    c: &Array2<f32>,
    d: &Array2<f32>,
    f: F,
) -> Result<Array2<f32>>
where
    F: Fn(f32, f32, f32, f32) -> f32 + Sync + Send,
{
    check_dimensions(a, b)?;
    check_dimensions(a, c)?;
    check_dimensions(a, d)?;
    evaluate(a.dim(), |row, col| {
        f(a[[row, col]], b[[row, col]], c[[row, col]], d[[row, col]])
    })
}

/// Apply `f` to every sample in place, in parallel when the data is contiguous.
pub(crate) fn for_each_sample<F>(array: &mut Array2<f32>, f: F)
where
    F: Fn(&mut f32) + Sync + Send,
{
    if let Some(samples) = array.as_slice_memory_order_mut() {
        samples.par_iter_mut().for_each(&f);
    } else {
        array.iter_mut().for_each(&f);
    }
}
