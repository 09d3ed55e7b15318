//! Spectral vegetation indices using near-infrared bands
//!
//! Every function coerces its bands to `f32`, evaluates the index per pixel
//! with plain IEEE arithmetic and hands the result to [`Scale::apply`].
//! Pixels where a denominator is zero come out as 0, never NaN.
//!
//! References:
//! - <https://www.l3harrisgeospatial.com/docs/BroadbandGreenness.html>
//! - <https://www.indexdatabase.de/db/i.php>

use super::coerce::AsBand;
use super::pixelwise::{zip2, zip3, zip4};
use super::rescale::Scale;
use ndarray::Array2;
use vegi_core::Result;

/// Natural output range of `ndvi`
pub const NDVI_RANGE: (f32, f32) = (-1.0, 1.0);
/// Natural output range of every other index
pub const UNIT_RANGE: (f32, f32) = (0.0, 1.0);

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Parameters for SAVI
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaviParams {
    /// Soil brightness correction factor (0 = dense vegetation, 1 = sparse)
    /// Default: 0.5
    pub l_factor: f32,
}

impl Default for SaviParams {
    fn default() -> Self {
        Self { l_factor: 0.5 }
    }
}

impl SaviParams {
    /// Soil factor of OSAVI (Rondeaux et al., 1996)
    pub const OPTIMIZED: SaviParams = SaviParams { l_factor: 0.16 };
}

/// Parameters for GOSAVI
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GosaviParams {
    /// Soil adjustment added to the denominator. Default: 0.16
    pub l_factor: f32,
}

impl Default for GosaviParams {
    fn default() -> Self {
        Self { l_factor: 0.16 }
    }
}

/// Parameters for EVI
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EviParams {
    /// Gain factor (default: 2.5)
    pub g: f32,
    /// Aerosol coefficient for red band (default: 6.0)
    pub c1: f32,
    /// Aerosol coefficient for blue band (default: 7.5)
    pub c2: f32,
    /// Canopy background adjustment (default: 1.0)
    pub l: f32,
}

impl Default for EviParams {
    fn default() -> Self {
        Self {
            g: 2.5,
            c1: 6.0,
            c2: 7.5,
            l: 1.0,
        }
    }
}

/// Parameters for the two-band EVI2
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evi2Params {
    /// Gain factor (default: 2.5)
    pub g: f32,
    /// Red coefficient (default: 2.4)
    pub c1: f32,
    /// Canopy background adjustment (default: 1.0)
    pub l: f32,
}

impl Default for Evi2Params {
    fn default() -> Self {
        Self {
            g: 2.5,
            c1: 2.4,
            l: 1.0,
        }
    }
}

/// Soil line for TSAVI
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TsaviParams {
    /// Soil line slope `m` (default: 0.5)
    pub slope: f32,
    /// Soil line intercept `b` (default: 0.0)
    pub intercept: f32,
}

impl Default for TsaviParams {
    fn default() -> Self {
        Self {
            slope: 0.5,
            intercept: 0.0,
        }
    }
}

/// Parameters for GARI
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GariParams {
    /// Aerosol weighting `y`. Default 1.7 (Gitelson, Kaufman & Merzlyak, 1996)
    pub gamma: f32,
}

impl Default for GariParams {
    fn default() -> Self {
        Self { gamma: 1.7 }
    }
}

// ---------------------------------------------------------------------------
// Normalized differences
// ---------------------------------------------------------------------------

/// Normalized Difference Vegetation Index
///
/// `NDVI = (NIR - Red) / (NIR + Red)`
///
/// Natural range [-1, 1]:
/// - Water: -1.0 to -0.1
/// - Barren rock, sand or snow: -0.1 to 0.1
/// - Shrub and grassland: 0.2 to 0.4
/// - Temperate and tropical forest: 0.4 to 1.0
///
/// # Arguments
/// * `red` - Red band (625-740 nm)
/// * `nir` - Near-infrared band (800-900 nm)
pub fn ndvi(red: &impl AsBand, nir: &impl AsBand, scale: Scale) -> Result<Array2<f32>> {
    let (red, nir) = (red.to_band()?, nir.to_band()?);
    let vi = zip2(&red, &nir, |r, n| (n - r) / (n + r))?;
    scale.apply(vi, NDVI_RANGE)
}

/// Green Normalized Difference Vegetation Index
///
/// `GNDVI = (NIR - Green) / (NIR + Green)`
///
/// NDVI with the 540-570 nm green band in place of red; more sensitive to
/// chlorophyll concentration.
pub fn gndvi(green: &impl AsBand, nir: &impl AsBand, scale: Scale) -> Result<Array2<f32>> {
    let (green, nir) = (green.to_band()?, nir.to_band()?);
    let vi = zip2(&green, &nir, |g, n| (n - g) / (n + g))?;
    scale.apply(vi, UNIT_RANGE)
}

/// Normalized Difference Water Index (McFeeters, 1996)
///
/// `NDWI = (Green - NIR) / (Green + NIR)`
///
/// Water bodies come out positive, vegetation and soil zero or negative.
pub fn ndwi(green: &impl AsBand, nir: &impl AsBand, scale: Scale) -> Result<Array2<f32>> {
    let (green, nir) = (green.to_band()?, nir.to_band()?);
    let vi = zip2(&green, &nir, |g, n| (g - n) / (g + n))?;
    scale.apply(vi, UNIT_RANGE)
}

/// Normalized Difference Red Edge Index
///
/// `NDRE = (NIR - RedEdge) / (NIR + RedEdge)`
///
/// Red-edge light (~715 nm) penetrates deeper into the canopy than red, so
/// NDRE saturates later than NDVI on mid to late season crops.
pub fn ndre(red_edge: &impl AsBand, nir: &impl AsBand, scale: Scale) -> Result<Array2<f32>> {
    let (re, nir) = (red_edge.to_band()?, nir.to_band()?);
    let vi = zip2(&re, &nir, |re, n| (n - re) / (n + re))?;
    scale.apply(vi, UNIT_RANGE)
}

/// Enhanced Normalized Difference Vegetation Index
///
/// `ENDVI = (NIR + Green - 2 * Blue) / (NIR + Green + 2 * Blue)`
pub fn endvi(
    blue: &impl AsBand,
    green: &impl AsBand,
    nir: &impl AsBand,
    scale: Scale,
) -> Result<Array2<f32>> {
    let (blue, green, nir) = (blue.to_band()?, green.to_band()?, nir.to_band()?);
    let vi = zip3(&blue, &green, &nir, |b, g, n| {
        (n + g - 2.0 * b) / (n + g + 2.0 * b)
    })?;
    scale.apply(vi, UNIT_RANGE)
}

/// Atmospherically Resistant Vegetation Index
///
/// `ARVI = (NIR - 2 * Red + Blue) / (NIR + 2 * Red + Blue)`
pub fn arvi(
    blue: &impl AsBand,
    red: &impl AsBand,
    nir: &impl AsBand,
    scale: Scale,
) -> Result<Array2<f32>> {
    let (blue, red, nir) = (blue.to_band()?, red.to_band()?, nir.to_band()?);
    let vi = zip3(&blue, &red, &nir, |b, r, n| {
        (n - 2.0 * r + b) / (n + 2.0 * r + b)
    })?;
    scale.apply(vi, UNIT_RANGE)
}

/// Green Red Normalized Difference Vegetation Index
///
/// `GRNDVI = (NIR - (Green + Red)) / (NIR + (Green + Red))`
pub fn grndvi(
    green: &impl AsBand,
    red: &impl AsBand,
    nir: &impl AsBand,
    scale: Scale,
) -> Result<Array2<f32>> {
    let (green, red, nir) = (green.to_band()?, red.to_band()?, nir.to_band()?);
    let vi = zip3(&green, &red, &nir, |g, r, n| (n - (g + r)) / (n + (g + r)))?;
    scale.apply(vi, UNIT_RANGE)
}

/// Green Atmospherically Resistant Vegetation Index
///
/// ```text
///          NIR - (Green - y * (Blue - Red))
/// GARI = ------------------------------------
///          NIR + (Green - y * (Blue - Red))
/// ```
///
/// Sensitive to a wide range of chlorophyll concentrations and less to
/// atmospheric effects than NDVI.
pub fn gari(
    blue: &impl AsBand,
    green: &impl AsBand,
    red: &impl AsBand,
    nir: &impl AsBand,
    params: GariParams,
    scale: Scale,
) -> Result<Array2<f32>> {
    let (blue, green) = (blue.to_band()?, green.to_band()?);
    let (red, nir) = (red.to_band()?, nir.to_band()?);
    let y = params.gamma;
    let vi = zip4(&blue, &green, &red, &nir, |b, g, r, n| {
        let corrected = g - y * (b - r);
        (n - corrected) / (n + corrected)
    })?;
    scale.apply(vi, UNIT_RANGE)
}

// ---------------------------------------------------------------------------
// Enhanced vegetation indices
// ---------------------------------------------------------------------------

/// Enhanced Vegetation Index (Huete et al., 2002)
///
/// `EVI = G * (NIR - Red) / (NIR + C1 * Red - C2 * Blue + L)`
///
/// More sensitive than NDVI in high biomass areas and reduces
/// atmospheric and soil noise.
pub fn evi(
    blue: &impl AsBand,
    red: &impl AsBand,
    nir: &impl AsBand,
    params: EviParams,
    scale: Scale,
) -> Result<Array2<f32>> {
    let (blue, red, nir) = (blue.to_band()?, red.to_band()?, nir.to_band()?);
    let EviParams { g, c1, c2, l } = params;
    let vi = zip3(&blue, &red, &nir, |b, r, n| {
        g * (n - r) / (n + c1 * r - c2 * b + l)
    })?;
    scale.apply(vi, UNIT_RANGE)
}

/// Two-band Enhanced Vegetation Index (Jiang et al., 2008)
///
/// `EVI2 = G * (NIR - Red) / (NIR + C1 * Red + L)`
pub fn evi2(
    red: &impl AsBand,
    nir: &impl AsBand,
    params: Evi2Params,
    scale: Scale,
) -> Result<Array2<f32>> {
    let (red, nir) = (red.to_band()?, nir.to_band()?);
    let Evi2Params { g, c1, l } = params;
    let vi = zip2(&red, &nir, |r, n| g * (n - r) / (n + c1 * r + l))?;
    scale.apply(vi, UNIT_RANGE)
}

// ---------------------------------------------------------------------------
// Soil adjusted indices
// ---------------------------------------------------------------------------

/// Soil Adjusted Vegetation Index (Huete, 1988)
///
/// `SAVI = (1 + L) * (NIR - Red) / (NIR + Red + L)`
///
/// Minimizes soil brightness influences on vegetation indices.
///
/// # Arguments
/// * `red` - Red band
/// * `nir` - Near-infrared band
/// * `params` - SAVI parameters (L factor)
pub fn savi(
    red: &impl AsBand,
    nir: &impl AsBand,
    params: SaviParams,
    scale: Scale,
) -> Result<Array2<f32>> {
    let (red, nir) = (red.to_band()?, nir.to_band()?);
    let l = params.l_factor;
    let vi = zip2(&red, &nir, |r, n| (1.0 + l) * (n - r) / (n + r + l))?;
    scale.apply(vi, UNIT_RANGE)
}

/// Optimized Soil Adjusted Vegetation Index (Rondeaux et al., 1996)
///
/// SAVI with the soil factor fixed at 0.16, the value found to minimize
/// sensitivity to soil background over a wide range of conditions. Best
/// suited to sparse canopies where soil shows through and NDVI saturates.
pub fn osavi(red: &impl AsBand, nir: &impl AsBand, scale: Scale) -> Result<Array2<f32>> {
    savi(red, nir, SaviParams::OPTIMIZED, scale)
}

/// Green Optimized Soil Adjusted Vegetation Index
///
/// `GOSAVI = (NIR - Green) / (NIR + Green + L)`
pub fn gosavi(
    green: &impl AsBand,
    nir: &impl AsBand,
    params: GosaviParams,
    scale: Scale,
) -> Result<Array2<f32>> {
    let (green, nir) = (green.to_band()?, nir.to_band()?);
    let l = params.l_factor;
    let vi = zip2(&green, &nir, |g, n| (n - g) / (n + g + l))?;
    scale.apply(vi, UNIT_RANGE)
}

/// Modified Soil Adjusted Vegetation Index 2 (Qi et al., 1994)
///
/// ```text
///           (2 * NIR + 1) - sqrt((2 * NIR + 1)^2 - 8 * (NIR - Red))
/// MSAVI2 = ---------------------------------------------------------
///                                     2
/// ```
///
/// A negative discriminant yields 0.
pub fn msavi2(red: &impl AsBand, nir: &impl AsBand, scale: Scale) -> Result<Array2<f32>> {
    let (red, nir) = (red.to_band()?, nir.to_band()?);
    let vi = zip2(&red, &nir, |r, n| {
        let s1 = 2.0 * n + 1.0;
        (s1 - (s1 * s1 - 8.0 * (n - r)).sqrt()) / 2.0
    })?;
    scale.apply(vi, UNIT_RANGE)
}

/// Transformed Soil Adjusted Vegetation Index (Baret & Guyot, 1991)
///
/// ```text
///                 m * (NIR - m * Red - b)
/// TSAVI = -----------------------------------------
///          Red + m * (NIR - b) + 0.08 * (1 + m^2)
/// ```
pub fn tsavi(
    red: &impl AsBand,
    nir: &impl AsBand,
    params: TsaviParams,
    scale: Scale,
) -> Result<Array2<f32>> {
    let (red, nir) = (red.to_band()?, nir.to_band()?);
    let TsaviParams {
        slope: m,
        intercept: b,
    } = params;
    let vi = zip2(&red, &nir, |r, n| {
        m * (n - m * r - b) / (r + m * (n - b) + 0.08 * (1.0 + m * m))
    })?;
    scale.apply(vi, UNIT_RANGE)
}

// ---------------------------------------------------------------------------
// Ratio and difference indices
// ---------------------------------------------------------------------------

/// Green Chlorophyll Index
///
/// `GCI = NIR / Green - 1 = (NIR - Green) / Green`
///
/// Estimates leaf chlorophyll content across a wide range of species.
pub fn gci(green: &impl AsBand, nir: &impl AsBand, scale: Scale) -> Result<Array2<f32>> {
    let (green, nir) = (green.to_band()?, nir.to_band()?);
    let vi = zip2(&green, &nir, |g, n| (n - g) / g)?;
    scale.apply(vi, UNIT_RANGE)
}

/// Transformed Difference Vegetation Index
///
/// `TDVI = 1.5 * (NIR - Red) / sqrt(NIR^2 + Red + 0.5)`
pub fn tdvi(red: &impl AsBand, nir: &impl AsBand, scale: Scale) -> Result<Array2<f32>> {
    let (red, nir) = (red.to_band()?, nir.to_band()?);
    let vi = zip2(&red, &nir, |r, n| 1.5 * (n - r) / (n * n + r + 0.5).sqrt())?;
    scale.apply(vi, UNIT_RANGE)
}

/// Chlorophyll Vegetation Index
///
/// `CVI = NIR * Red / Green^2`
///
/// Used to detect chlorotic crops and estimate chlorophyll (and, when
/// nitrogen is limiting, N) content.
pub fn cvi(
    green: &impl AsBand,
    red: &impl AsBand,
    nir: &impl AsBand,
    scale: Scale,
) -> Result<Array2<f32>> {
    let (green, red, nir) = (green.to_band()?, red.to_band()?, nir.to_band()?);
    let vi = zip3(&green, &red, &nir, |g, r, n| n * r / (g * g))?;
    scale.apply(vi, UNIT_RANGE)
}

/// Modified Triangular Vegetation Index 2 (Haboudane et al., 2004)
///
/// ```text
///          1.5 * (2.5 * (NIR - Green) - 2.5 * (Red - Green))
/// MTVI2 = -----------------------------------------------------
///          sqrt((2 * NIR + 1)^2 - 6 * NIR - 5 * sqrt(Red) - 0.5)
/// ```
pub fn mtvi2(
    green: &impl AsBand,
    red: &impl AsBand,
    nir: &impl AsBand,
    scale: Scale,
) -> Result<Array2<f32>> {
    let (green, red, nir) = (green.to_band()?, red.to_band()?, nir.to_band()?);
    let vi = zip3(&green, &red, &nir, |g, r, n| {
        let num = 1.5 * (2.5 * (n - g) - 2.5 * (r - g));
        let s = 2.0 * n + 1.0;
        num / (s * s - 6.0 * n - 5.0 * r.sqrt() - 0.5).sqrt()
    })?;
    scale.apply(vi, UNIT_RANGE)
}

/// Structure Insensitive Pigment Index
///
/// `SIPI = (NIR - Blue) / (NIR - Red)`
pub fn sipi(
    blue: &impl AsBand,
    red: &impl AsBand,
    nir: &impl AsBand,
    scale: Scale,
) -> Result<Array2<f32>> {
    let (blue, red, nir) = (blue.to_band()?, red.to_band()?, nir.to_band()?);
    let vi = zip3(&blue, &red, &nir, |b, r, n| (n - b) / (n - r))?;
    scale.apply(vi, UNIT_RANGE)
}

/// Simple Ratio, also Ratio Vegetation Index
///
/// `SR = NIR / Red`
pub fn sr(red: &impl AsBand, nir: &impl AsBand, scale: Scale) -> Result<Array2<f32>> {
    let (red, nir) = (red.to_band()?, nir.to_band()?);
    let vi = zip2(&red, &nir, |r, n| n / r)?;
    scale.apply(vi, UNIT_RANGE)
}

/// Temperature Vegetation Index
///
/// `TVX = LST / NDVI`
///
/// NDVI is computed first with its natural scaling, so black pixels
/// (NDVI sanitized to 0) give 0 here as well.
///
/// # Arguments
/// * `red` - Red band
/// * `nir` - Near-infrared band
/// * `thermal` - Land surface temperature
pub fn tvx(
    red: &impl AsBand,
    nir: &impl AsBand,
    thermal: &impl AsBand,
    scale: Scale,
) -> Result<Array2<f32>> {
    let inner = ndvi(red, nir, Scale::default())?;
    let lst = thermal.to_band()?;
    let vi = zip2(&inner, &lst, |v, t| t / v)?;
    scale.apply(vi, UNIT_RANGE)
}

/// Infrared Percentage Vegetation Index (Crippen, 1990)
///
/// `IPVI = NIR / (NIR + Red)`
pub fn ipvi(red: &impl AsBand, nir: &impl AsBand, scale: Scale) -> Result<Array2<f32>> {
    let (red, nir) = (red.to_band()?, nir.to_band()?);
    let vi = zip2(&red, &nir, |r, n| n / (n + r))?;
    scale.apply(vi, UNIT_RANGE)
}

/// Difference Vegetation Index
///
/// `DVI = NIR - Red`
pub fn dvi(red: &impl AsBand, nir: &impl AsBand, scale: Scale) -> Result<Array2<f32>> {
    let (red, nir) = (red.to_band()?, nir.to_band()?);
    let vi = zip2(&red, &nir, |r, n| n - r)?;
    scale.apply(vi, UNIT_RANGE)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn make_band(rows: usize, cols: usize, value: f32) -> Array2<f32> {
        Array2::from_elem((rows, cols), value)
    }

    fn make_gradient(rows: usize, cols: usize, start: f32, step: f32) -> Array2<f32> {
        Array2::from_shape_fn((rows, cols), |(row, col)| {
            start + (row * cols + col) as f32 * step
        })
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-5,
            "Expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_ndvi_literal_grid() {
        let red = [[10, 20], [30, 40]];
        let nir = [[40, 30], [20, 10]];

        let result = ndvi(&red, &nir, Scale::default()).unwrap();

        let expected = array![[0.6f32, 0.2], [-0.2, -0.6]];
        for (v, e) in result.iter().zip(expected.iter()) {
            assert_close(*v, *e);
        }
    }

    #[test]
    fn test_ndvi_range() {
        let red = make_gradient(10, 10, 1.0, 613.0);
        let nir = make_gradient(10, 10, 65535.0, -650.0);

        let result = ndvi(&red, &nir, Scale::default()).unwrap();
        for &v in result.iter() {
            assert!((-1.0..=1.0).contains(&v), "NDVI out of range: {}", v);
        }
    }

    #[test]
    fn test_ndvi_black_pixel_is_zero() {
        let red = array![[0u16, 100], [0, 0]];
        let nir = array![[0u16, 300], [0, 0]];

        let result = ndvi(&red, &nir, Scale::default()).unwrap();
        assert_eq!(result[[0, 0]], 0.0);
        assert_eq!(result[[1, 1]], 0.0);
        assert_close(result[[0, 1]], 0.5);
    }

    #[test]
    fn test_ndvi_custom_range_remaps() {
        let red = make_band(2, 2, 0.1);
        let nir = make_band(2, 2, 0.5);

        // [-1, 3] -> [0, 1]
        let result = ndvi(&red, &nir, Scale::range(-1.0, 3.0)).unwrap();
        let raw = (0.5 - 0.1) / (0.5 + 0.1);
        assert_close(result[[1, 1]], (raw + 1.0) / 4.0);
    }

    #[test]
    fn test_ndvi_dimension_mismatch() {
        let red = make_band(5, 5, 1.0);
        let nir = make_band(5, 10, 1.0);
        assert!(ndvi(&red, &nir, Scale::default()).is_err());
    }

    #[test]
    fn test_ndwi_positive_over_water() {
        let green = make_band(3, 3, 0.3);
        let nir = make_band(3, 3, 0.1);

        let result = ndwi(&green, &nir, Scale::default()).unwrap();
        assert_close(result[[1, 1]], 0.5);
    }

    #[test]
    fn test_gndvi_and_ndre() {
        let nir = make_band(3, 3, 0.6);

        let g = gndvi(&make_band(3, 3, 0.2), &nir, Scale::default()).unwrap();
        assert_close(g[[0, 0]], (0.6 - 0.2) / (0.6 + 0.2));

        let re = ndre(&make_band(3, 3, 0.3), &nir, Scale::default()).unwrap();
        assert_close(re[[2, 2]], (0.6 - 0.3) / (0.6 + 0.3));
    }

    #[test]
    fn test_savi() {
        let red = make_band(5, 5, 0.1);
        let nir = make_band(5, 5, 0.5);

        let result = savi(&red, &nir, SaviParams::default(), Scale::default()).unwrap();

        // ((0.5 - 0.1) / (0.5 + 0.1 + 0.5)) * 1.5 ≈ 0.5455
        assert_close(result[[2, 2]], 1.5 * 0.4 / 1.1);
    }

    #[test]
    fn test_osavi_is_savi_with_optimized_factor() {
        let red = make_gradient(4, 4, 3.0, 17.0);
        let nir = make_gradient(4, 4, 250.0, -9.0);

        let o = osavi(&red, &nir, Scale::default()).unwrap();
        let s = savi(&red, &nir, SaviParams { l_factor: 0.16 }, Scale::default()).unwrap();
        assert_eq!(o, s);
    }

    #[test]
    fn test_evi() {
        let blue = make_band(5, 5, 0.05);
        let red = make_band(5, 5, 0.1);
        let nir = make_band(5, 5, 0.5);

        let result = evi(&blue, &red, &nir, EviParams::default(), Scale::default()).unwrap();

        let p = EviParams::default();
        let expected = p.g * (0.5 - 0.1) / (0.5 + p.c1 * 0.1 - p.c2 * 0.05 + p.l);
        assert_close(result[[2, 2]], expected);
    }

    #[test]
    fn test_evi2() {
        let result = evi2(
            &make_band(2, 2, 0.1),
            &make_band(2, 2, 0.5),
            Evi2Params::default(),
            Scale::default(),
        )
        .unwrap();
        assert_close(result[[0, 0]], 2.5 * 0.4 / (0.5 + 0.24 + 1.0));
    }

    #[test]
    fn test_msavi2_negative_discriminant_is_zero() {
        // (2 * 0 + 1)^2 - 8 * (0 - (-1)) = -7
        let result = msavi2(&[[-1.0f32]], &[[0.0f32]], Scale::default()).unwrap();
        assert_eq!(result[[0, 0]], 0.0);

        let result = msavi2(&[[0.1f32]], &[[0.5f32]], Scale::default()).unwrap();
        let s1: f32 = 2.0 * 0.5 + 1.0;
        assert_close(result[[0, 0]], (s1 - (s1 * s1 - 8.0 * 0.4).sqrt()) / 2.0);
    }

    #[test]
    fn test_tsavi_default_soil_line() {
        let result = tsavi(&[[0.1f32]], &[[0.5f32]], TsaviParams::default(), Scale::default())
            .unwrap();
        let expected = 0.5 * (0.5 - 0.05) / (0.1 + 0.25 + 0.08 * 1.25);
        assert_close(result[[0, 0]], expected);
    }

    #[test]
    fn test_gari() {
        let result = gari(
            &[[0.05f32]],
            &[[0.2f32]],
            &[[0.1f32]],
            &[[0.6f32]],
            GariParams::default(),
            Scale::default(),
        )
        .unwrap();
        let corrected = 0.2 - 1.7 * (0.05 - 0.1);
        assert_close(result[[0, 0]], (0.6 - corrected) / (0.6 + corrected));
    }

    #[test]
    fn test_ratio_indices_zero_denominator() {
        let zero = make_band(2, 2, 0.0);
        let nir = make_band(2, 2, 0.4);

        assert!(sr(&zero, &nir, Scale::default()).unwrap().iter().all(|&v| v == 0.0));
        assert!(gci(&zero, &nir, Scale::default()).unwrap().iter().all(|&v| v == 0.0));
        assert!(cvi(&zero, &nir, &nir, Scale::default())
            .unwrap()
            .iter()
            .all(|&v| v == 0.0));
    }

    #[test]
    fn test_sr_ipvi_dvi() {
        let red = make_band(2, 2, 0.2);
        let nir = make_band(2, 2, 0.6);

        assert_close(sr(&red, &nir, Scale::default()).unwrap()[[0, 0]], 3.0);
        assert_close(ipvi(&red, &nir, Scale::default()).unwrap()[[0, 0]], 0.75);
        assert_close(dvi(&red, &nir, Scale::default()).unwrap()[[0, 0]], 0.4);
    }

    #[test]
    fn test_tvx_divides_by_inner_ndvi() {
        let red = [[10.0f32, 0.0]];
        let nir = [[30.0f32, 0.0]];
        let lst = [[300.0f32, 290.0]];

        let result = tvx(&red, &nir, &lst, Scale::default()).unwrap();

        // NDVI = 0.5 -> 300 / 0.5; black pixel NDVI sanitized to 0 -> inf -> 0
        assert_close(result[[0, 0]], 600.0);
        assert_eq!(result[[0, 1]], 0.0);
    }

    #[test]
    fn test_clip_bounds_respected() {
        let red = make_gradient(6, 6, 0.0, 0.02);
        let nir = make_band(6, 6, 0.4);

        let result = sr(&red, &nir, Scale::default().clipped(0.0, 5.0)).unwrap();
        for &v in result.iter() {
            assert!((0.0..=5.0).contains(&v), "SR outside clip: {}", v);
        }
    }

    // Single reference pixel: B = 0.05, G = 0.1, R = 0.08, NIR = 0.5
    const B: [[f32; 1]; 1] = [[0.05]];
    const G: [[f32; 1]; 1] = [[0.1]];
    const R: [[f32; 1]; 1] = [[0.08]];
    const N: [[f32; 1]; 1] = [[0.5]];

    #[test]
    fn test_endvi_value() {
        // (0.5 + 0.1 - 0.1) / (0.5 + 0.1 + 0.1)
        let out = endvi(&B, &G, &N, Scale::default()).unwrap();
        assert_close(out[[0, 0]], 0.5 / 0.7);
    }

    #[test]
    fn test_arvi_value() {
        // (0.5 - 0.16 + 0.05) / (0.5 + 0.16 + 0.05)
        let out = arvi(&B, &R, &N, Scale::default()).unwrap();
        assert_close(out[[0, 0]], 0.39 / 0.71);
    }

    #[test]
    fn test_grndvi_value() {
        // (0.5 - 0.18) / (0.5 + 0.18)
        let out = grndvi(&G, &R, &N, Scale::default()).unwrap();
        assert_close(out[[0, 0]], 0.32 / 0.68);
    }

    #[test]
    fn test_sipi_value() {
        // (0.5 - 0.05) / (0.5 - 0.08)
        let out = sipi(&B, &R, &N, Scale::default()).unwrap();
        assert_close(out[[0, 0]], 0.45 / 0.42);
    }

    #[test]
    fn test_tdvi_value() {
        // 1.5 * 0.42 / sqrt(0.25 + 0.08 + 0.5)
        let out = tdvi(&R, &N, Scale::default()).unwrap();
        assert_close(out[[0, 0]], 0.63 / 0.83f32.sqrt());
    }

    #[test]
    fn test_mtvi2_value() {
        // G = 0.1, R = 0.04, NIR = 0.8
        // numerator: 1.5 * (2.5 * 0.7 - 2.5 * -0.06) = 2.85
        // denominator: sqrt(2.6^2 - 4.8 - 5 * 0.2 - 0.5) = sqrt(0.46)
        let out = mtvi2(&G, &[[0.04f32]], &[[0.8f32]], Scale::default()).unwrap();
        assert_close(out[[0, 0]], 2.85 / 0.46f32.sqrt());
    }

    #[test]
    fn test_gosavi_value() {
        // (0.5 - 0.1) / (0.5 + 0.1 + 0.16)
        let out = gosavi(&G, &N, GosaviParams::default(), Scale::default()).unwrap();
        assert_close(out[[0, 0]], 0.4 / 0.76);

        let out = gosavi(&G, &N, GosaviParams { l_factor: 0.4 }, Scale::default()).unwrap();
        assert_close(out[[0, 0]], 0.4);
    }

    #[test]
    fn test_cvi_value() {
        // 0.5 * 0.08 / 0.1^2
        let out = cvi(&G, &R, &N, Scale::default()).unwrap();
        assert_close(out[[0, 0]], 4.0);
    }

    #[test]
    fn test_sipi_tdvi_mtvi2_finite() {
        let blue = make_gradient(4, 4, 0.02, 0.001);
        let green = make_gradient(4, 4, 0.08, 0.002);
        let red = make_gradient(4, 4, 0.05, 0.003);
        let nir = make_gradient(4, 4, 0.3, 0.01);

        for out in [
            sipi(&blue, &red, &nir, Scale::default()).unwrap(),
            tdvi(&red, &nir, Scale::default()).unwrap(),
            mtvi2(&green, &red, &nir, Scale::default()).unwrap(),
            arvi(&blue, &red, &nir, Scale::default()).unwrap(),
            endvi(&blue, &green, &nir, Scale::default()).unwrap(),
            grndvi(&green, &red, &nir, Scale::default()).unwrap(),
        ] {
            assert_eq!(out.dim(), (4, 4));
            assert!(out.iter().all(|v| v.is_finite()));
        }
    }
}
