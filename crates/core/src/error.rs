//! Error types for vegi

use thiserror::Error;

/// Main error type for vegi operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Index out of bounds: ({row}, {col}) in raster of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Input bands of one call do not share the same grid dimensions
    #[error("Band size mismatch: expected ({er}, {ec}), got ({ar}, {ac})")]
    SizeMismatch { er: usize, ec: usize, ar: usize, ac: usize },

    /// A textual parameter is not a number. Numeric inputs are narrowed
    /// to `f32` with IEEE casting and never produce this.
    #[error("Cannot convert {name} to f32: {reason}")]
    TypeConversion { name: String, reason: String },

    /// Rescale requested with a degenerate `low == high` range
    #[error("Invalid rescale range: low ({low}) must differ from high ({high})")]
    InvalidRange { low: f32, high: f32 },

    #[error("Unknown pansharpening method: '{0}' (expected browley, simple_browley, sample_mean or esri)")]
    UnknownMethod(String),

    #[error("Unknown spectral index: '{0}'")]
    UnknownIndex(String),

    #[error("Unsupported data type: {0}")]
    UnsupportedDataType(String),

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for vegi operations
pub type Result<T> = std::result::Result<T, Error>;
