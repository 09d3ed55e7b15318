//! Name-based index dispatch
//!
//! [`SpectralIndex`] is the closed catalog of every index this crate
//! computes. Resolve one from a user-supplied name with [`str::parse`],
//! then run it through [`SpectralIndex::compute`] with bands in the order
//! given by [`SpectralIndex::bands`]. [`vi`] does both in one call.

use super::coerce::{coerce_scalar, parse_scalar, AsBand};
use super::indices::{self, EviParams, Evi2Params, GariParams, GosaviParams, SaviParams, TsaviParams};
use super::indices::{NDVI_RANGE, UNIT_RANGE};
use super::rescale::{Bounds, Scale};
use super::visible;
use ndarray::Array2;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use vegi_core::{Error, Result};

/// Spectral role of an input band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandKind {
    Blue,
    Green,
    Red,
    RedEdge,
    Nir,
    /// Land surface temperature
    Thermal,
}

impl BandKind {
    pub fn name(&self) -> &'static str {
        match self {
            BandKind::Blue => "blue",
            BandKind::Green => "green",
            BandKind::Red => "red",
            BandKind::RedEdge => "red_edge",
            BandKind::Nir => "nir",
            BandKind::Thermal => "thermal",
        }
    }
}

impl fmt::Display for BandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BandKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "blue" | "b" => Ok(BandKind::Blue),
            "green" | "g" => Ok(BandKind::Green),
            "red" | "r" => Ok(BandKind::Red),
            "red_edge" | "rededge" | "re" => Ok(BandKind::RedEdge),
            "nir" => Ok(BandKind::Nir),
            "thermal" | "t" | "lst" => Ok(BandKind::Thermal),
            _ => Err(Error::InvalidParameter {
                name: "band".into(),
                value: s.to_string(),
                reason: "expected blue, green, red, red_edge, nir or thermal".into(),
            }),
        }
    }
}

use self::BandKind::{Blue, Green, Nir, Red, RedEdge, Thermal};

/// Enumeration of supported spectral indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(clippy::upper_case_acronyms)]
pub enum SpectralIndex {
    /// Normalized Difference Vegetation Index
    NDVI,
    /// Green Normalized Difference Vegetation Index
    GNDVI,
    /// Normalized Difference Water Index (McFeeters)
    NDWI,
    /// Normalized Difference Red Edge Index
    NDRE,
    /// Enhanced Vegetation Index
    EVI,
    /// Two-band Enhanced Vegetation Index
    EVI2,
    /// Enhanced Normalized Difference Vegetation Index
    ENDVI,
    /// Green Chlorophyll Index
    GCI,
    /// Atmospherically Resistant Vegetation Index
    ARVI,
    /// Soil Adjusted Vegetation Index
    SAVI,
    /// Optimized Soil Adjusted Vegetation Index
    OSAVI,
    /// Green Optimized Soil Adjusted Vegetation Index
    GOSAVI,
    /// Modified Soil Adjusted Vegetation Index 2
    MSAVI2,
    /// Transformed Soil Adjusted Vegetation Index
    TSAVI,
    /// Green Atmospherically Resistant Vegetation Index
    GARI,
    /// Transformed Difference Vegetation Index
    TDVI,
    /// Chlorophyll Vegetation Index
    CVI,
    /// Modified Triangular Vegetation Index 2
    MTVI2,
    /// Structure Insensitive Pigment Index
    SIPI,
    /// Simple Ratio
    SR,
    /// Temperature Vegetation Index
    TVX,
    /// Infrared Percentage Vegetation Index
    IPVI,
    /// Difference Vegetation Index
    DVI,
    /// Green Red Normalized Difference Vegetation Index
    GRNDVI,
    /// Visible Normalized Difference Vegetation Index
    VNDVI,
    /// Green Leaf Index
    GLI,
    /// Visible Atmospherically Resistant Index
    VARI,
    /// Visible-band Difference Vegetation Index
    VDVI,
    /// Green Red Vegetation Index
    GRVI,
    /// Triangular Greenness Index
    TGI,
}

impl SpectralIndex {
    pub const ALL: [SpectralIndex; 30] = [
        SpectralIndex::NDVI,
        SpectralIndex::GNDVI,
        SpectralIndex::NDWI,
        SpectralIndex::NDRE,
        SpectralIndex::EVI,
        SpectralIndex::EVI2,
        SpectralIndex::ENDVI,
        SpectralIndex::GCI,
        SpectralIndex::ARVI,
        SpectralIndex::SAVI,
        SpectralIndex::OSAVI,
        SpectralIndex::GOSAVI,
        SpectralIndex::MSAVI2,
        SpectralIndex::TSAVI,
        SpectralIndex::GARI,
        SpectralIndex::TDVI,
        SpectralIndex::CVI,
        SpectralIndex::MTVI2,
        SpectralIndex::SIPI,
        SpectralIndex::SR,
        SpectralIndex::TVX,
        SpectralIndex::IPVI,
        SpectralIndex::DVI,
        SpectralIndex::GRNDVI,
        SpectralIndex::VNDVI,
        SpectralIndex::GLI,
        SpectralIndex::VARI,
        SpectralIndex::VDVI,
        SpectralIndex::GRVI,
        SpectralIndex::TGI,
    ];

    /// Lowercase identifier, as accepted by `FromStr`
    pub fn name(&self) -> &'static str {
        use SpectralIndex::*;
        match self {
            NDVI => "ndvi",
            GNDVI => "gndvi",
            NDWI => "ndwi",
            NDRE => "ndre",
            EVI => "evi",
            EVI2 => "evi2",
            ENDVI => "endvi",
            GCI => "gci",
            ARVI => "arvi",
            SAVI => "savi",
            OSAVI => "osavi",
            GOSAVI => "gosavi",
            MSAVI2 => "msavi2",
            TSAVI => "tsavi",
            GARI => "gari",
            TDVI => "tdvi",
            CVI => "cvi",
            MTVI2 => "mtvi2",
            SIPI => "sipi",
            SR => "sr",
            TVX => "tvx",
            IPVI => "ipvi",
            DVI => "dvi",
            GRNDVI => "grndvi",
            VNDVI => "vndvi",
            GLI => "gli",
            VARI => "vari",
            VDVI => "vdvi",
            GRVI => "grvi",
            TGI => "tgi",
        }
    }

    /// Input bands, in the order [`compute`](Self::compute) expects them
    pub fn bands(&self) -> &'static [BandKind] {
        use SpectralIndex::*;
        match self {
            NDVI | SAVI | OSAVI | MSAVI2 | TSAVI | TDVI | SR | IPVI | DVI | EVI2 => &[Red, Nir],
            GNDVI | NDWI | GCI | GOSAVI => &[Green, Nir],
            NDRE => &[RedEdge, Nir],
            EVI | ARVI | SIPI => &[Blue, Red, Nir],
            ENDVI => &[Blue, Green, Nir],
            CVI | MTVI2 | GRNDVI => &[Green, Red, Nir],
            GARI => &[Blue, Green, Red, Nir],
            TVX => &[Red, Nir, Thermal],
            VNDVI | GRVI => &[Green, Red],
            GLI | VARI | VDVI | TGI => &[Blue, Green, Red],
        }
    }

    /// Default `(low, high)`; requesting exactly this range skips the remap
    pub fn natural_range(&self) -> (f32, f32) {
        match self {
            SpectralIndex::NDVI => NDVI_RANGE,
            _ => UNIT_RANGE,
        }
    }

    /// Names of the tunable constants, as accepted by [`IndexParams::set`]
    pub fn constants(&self) -> &'static [&'static str] {
        use SpectralIndex::*;
        match self {
            EVI => &["g", "c1", "c2", "l"],
            EVI2 => &["g", "c1", "l"],
            SAVI | GOSAVI => &["l"],
            TSAVI => &["m", "b"],
            GARI => &["y"],
            _ => &[],
        }
    }

    pub fn equation(&self) -> &'static str {
        use SpectralIndex::*;
        match self {
            NDVI => "(NIR - R) / (NIR + R)",
            GNDVI => "(NIR - G) / (NIR + G)",
            NDWI => "(G - NIR) / (G + NIR)",
            NDRE => "(NIR - RE) / (NIR + RE)",
            EVI => "G * (NIR - R) / (NIR + C1 * R - C2 * B + L)",
            EVI2 => "G * (NIR - R) / (NIR + C1 * R + L)",
            ENDVI => "(NIR + G - 2B) / (NIR + G + 2B)",
            GCI => "(NIR - G) / G",
            ARVI => "(NIR - 2R + B) / (NIR + 2R + B)",
            SAVI => "(1 + L) * (NIR - R) / (NIR + R + L)",
            OSAVI => "1.16 * (NIR - R) / (NIR + R + 0.16)",
            GOSAVI => "(NIR - G) / (NIR + G + L)",
            MSAVI2 => "((2NIR + 1) - sqrt((2NIR + 1)^2 - 8(NIR - R))) / 2",
            TSAVI => "m(NIR - mR - b) / (R + m(NIR - b) + 0.08(1 + m^2))",
            GARI => "(NIR - (G - y(B - R))) / (NIR + (G - y(B - R)))",
            TDVI => "1.5 * (NIR - R) / sqrt(NIR^2 + R + 0.5)",
            CVI => "NIR * R / G^2",
            MTVI2 => "1.5(2.5(NIR - G) - 2.5(R - G)) / sqrt((2NIR + 1)^2 - 6NIR - 5sqrt(R) - 0.5)",
            SIPI => "(NIR - B) / (NIR - R)",
            SR => "NIR / R",
            TVX => "T / NDVI",
            IPVI => "NIR / (NIR + R)",
            DVI => "NIR - R",
            GRNDVI => "(NIR - (G + R)) / (NIR + (G + R))",
            VNDVI | GRVI => "(G - R) / (G + R)",
            GLI | VDVI => "(2G - R - B) / (2G + R + B)",
            VARI => "(G - R) / (G + R - B)",
            TGI => "G - 0.39R - 0.61B",
        }
    }

    /// Run the index on `bands`, given in [`bands`](Self::bands) order.
    ///
    /// # Errors
    /// [`Error::InvalidParameter`] for a wrong band count or a constant
    /// this index does not take, plus any error of the formula itself.
    pub fn compute(&self, bands: &[&dyn AsBand], params: &IndexParams) -> Result<Array2<f32>> {
        let expected = self.bands();
        if bands.len() != expected.len() {
            let names: Vec<&str> = expected.iter().map(BandKind::name).collect();
            return Err(Error::InvalidParameter {
                name: "bands".into(),
                value: bands.len().to_string(),
                reason: format!("{} takes {} bands ({})", self, expected.len(), names.join(", ")),
            });
        }
        for (name, value) in params.constants() {
            if !self.constants().contains(&name) {
                return Err(Error::InvalidParameter {
                    name: name.into(),
                    value: value.to_string(),
                    reason: format!("not accepted by {}", self),
                });
            }
        }

        use SpectralIndex::*;
        let s = params.scale;
        let b = bands;
        match self {
            NDVI => indices::ndvi(&b[0], &b[1], s),
            GNDVI => indices::gndvi(&b[0], &b[1], s),
            NDWI => indices::ndwi(&b[0], &b[1], s),
            NDRE => indices::ndre(&b[0], &b[1], s),
            EVI => indices::evi(&b[0], &b[1], &b[2], params.evi(), s),
            EVI2 => indices::evi2(&b[0], &b[1], params.evi2(), s),
            ENDVI => indices::endvi(&b[0], &b[1], &b[2], s),
            GCI => indices::gci(&b[0], &b[1], s),
            ARVI => indices::arvi(&b[0], &b[1], &b[2], s),
            SAVI => indices::savi(&b[0], &b[1], params.savi(), s),
            OSAVI => indices::osavi(&b[0], &b[1], s),
            GOSAVI => indices::gosavi(&b[0], &b[1], params.gosavi(), s),
            MSAVI2 => indices::msavi2(&b[0], &b[1], s),
            TSAVI => indices::tsavi(&b[0], &b[1], params.tsavi(), s),
            GARI => indices::gari(&b[0], &b[1], &b[2], &b[3], params.gari(), s),
            TDVI => indices::tdvi(&b[0], &b[1], s),
            CVI => indices::cvi(&b[0], &b[1], &b[2], s),
            MTVI2 => indices::mtvi2(&b[0], &b[1], &b[2], s),
            SIPI => indices::sipi(&b[0], &b[1], &b[2], s),
            SR => indices::sr(&b[0], &b[1], s),
            TVX => indices::tvx(&b[0], &b[1], &b[2], s),
            IPVI => indices::ipvi(&b[0], &b[1], s),
            DVI => indices::dvi(&b[0], &b[1], s),
            GRNDVI => indices::grndvi(&b[0], &b[1], &b[2], s),
            VNDVI => visible::vndvi(&b[0], &b[1], s),
            GLI => visible::gli(&b[0], &b[1], &b[2], s),
            VARI => visible::vari(&b[0], &b[1], &b[2], s),
            VDVI => visible::vdvi(&b[0], &b[1], &b[2], s),
            GRVI => visible::grvi(&b[0], &b[1], s),
            TGI => visible::tgi(&b[0], &b[1], &b[2], s),
        }
    }
}

impl fmt::Display for SpectralIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpectralIndex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        SpectralIndex::ALL
            .iter()
            .copied()
            .find(|index| index.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownIndex(s.to_string()))
    }
}

/// Keyword parameters for [`vi`]
///
/// Unset constants fall back to each index's literature default.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IndexParams {
    pub scale: Scale,
    pub l: Option<f32>,
    pub y: Option<f32>,
    pub m: Option<f32>,
    pub b: Option<f32>,
    pub g: Option<f32>,
    pub c1: Option<f32>,
    pub c2: Option<f32>,
}

impl IndexParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter by name (case-insensitive).
    ///
    /// Accepts `low`, `high`, `bound_low`, `bound_high` and the index
    /// constants `l`, `y`, `m`, `b`, `g`, `c1`, `c2`.
    pub fn set<T: ToPrimitive>(&mut self, name: &str, value: T) -> Result<()> {
        let key = name.to_ascii_lowercase();
        let v = coerce_scalar(&key, value)?;
        match key.as_str() {
            "low" => self.scale.low = Some(v),
            "high" => self.scale.high = Some(v),
            "bound_low" => self.scale.clip.min = Some(v),
            "bound_high" => self.scale.clip.max = Some(v),
            "l" => self.l = Some(v),
            "y" => self.y = Some(v),
            "m" => self.m = Some(v),
            "b" => self.b = Some(v),
            "g" => self.g = Some(v),
            "c1" => self.c1 = Some(v),
            "c2" => self.c2 = Some(v),
            _ => {
                return Err(Error::InvalidParameter {
                    name: name.to_string(),
                    value: v.to_string(),
                    reason: "unknown parameter".into(),
                })
            }
        }
        Ok(())
    }

    /// [`set`](Self::set) from text, as given on a command line
    pub fn set_str(&mut self, name: &str, text: &str) -> Result<()> {
        let v = parse_scalar(name, text)?;
        self.set(name, v)
    }

    /// Builder form of [`set`](Self::set)
    pub fn with<T: ToPrimitive>(mut self, name: &str, value: T) -> Result<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Clip bounds currently set
    pub fn bounds(&self) -> Bounds {
        self.scale.clip
    }

    /// Index constants that have been set, by name
    fn constants(&self) -> impl Iterator<Item = (&'static str, f32)> {
        [
            ("l", self.l),
            ("y", self.y),
            ("m", self.m),
            ("b", self.b),
            ("g", self.g),
            ("c1", self.c1),
            ("c2", self.c2),
        ]
        .into_iter()
        .filter_map(|(name, v)| v.map(|v| (name, v)))
    }

    fn savi(&self) -> SaviParams {
        let d = SaviParams::default();
        SaviParams {
            l_factor: self.l.unwrap_or(d.l_factor),
        }
    }

    fn gosavi(&self) -> GosaviParams {
        let d = GosaviParams::default();
        GosaviParams {
            l_factor: self.l.unwrap_or(d.l_factor),
        }
    }

    fn evi(&self) -> EviParams {
        let d = EviParams::default();
        EviParams {
            g: self.g.unwrap_or(d.g),
            c1: self.c1.unwrap_or(d.c1),
            c2: self.c2.unwrap_or(d.c2),
            l: self.l.unwrap_or(d.l),
        }
    }

    fn evi2(&self) -> Evi2Params {
        let d = Evi2Params::default();
        Evi2Params {
            g: self.g.unwrap_or(d.g),
            c1: self.c1.unwrap_or(d.c1),
            l: self.l.unwrap_or(d.l),
        }
    }

    fn tsavi(&self) -> TsaviParams {
        let d = TsaviParams::default();
        TsaviParams {
            slope: self.m.unwrap_or(d.slope),
            intercept: self.b.unwrap_or(d.intercept),
        }
    }

    fn gari(&self) -> GariParams {
        GariParams {
            gamma: self.y.unwrap_or(GariParams::default().gamma),
        }
    }
}

/// Compute an index by name.
///
/// ```ignore
/// let params = IndexParams::new().with("L", 0.25)?;
/// let savi = vi("SAVI", &[&red, &nir], &params)?;
/// ```
pub fn vi(name: &str, bands: &[&dyn AsBand], params: &IndexParams) -> Result<Array2<f32>> {
    let index: SpectralIndex = name.parse()?;
    tracing::debug!(index = %index, bands = bands.len(), ?params, "computing spectral index");
    index.compute(bands, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn make_band(rows: usize, cols: usize, value: f32) -> Array2<f32> {
        Array2::from_elem((rows, cols), value)
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("NDVI".parse::<SpectralIndex>().unwrap(), SpectralIndex::NDVI);
        assert_eq!("ndvi".parse::<SpectralIndex>().unwrap(), SpectralIndex::NDVI);
        assert_eq!("Msavi2".parse::<SpectralIndex>().unwrap(), SpectralIndex::MSAVI2);
    }

    #[test]
    fn test_unknown_index() {
        let err = "ndxx".parse::<SpectralIndex>().unwrap_err();
        assert!(matches!(err, Error::UnknownIndex(ref n) if n == "ndxx"));

        let red = make_band(2, 2, 1.0);
        assert!(matches!(
            vi("nope", &[&red, &red], &IndexParams::new()),
            Err(Error::UnknownIndex(_))
        ));
    }

    #[test]
    fn test_names_roundtrip() {
        for index in SpectralIndex::ALL {
            assert_eq!(index.name().parse::<SpectralIndex>().unwrap(), index);
            assert_eq!(index.to_string(), index.name());
            assert!(!index.bands().is_empty());
            assert!(!index.equation().is_empty());
        }
    }

    #[test]
    fn test_vi_matches_named_function() {
        let red = array![[10.0f32, 20.0], [30.0, 40.0]];
        let nir = array![[40.0f32, 30.0], [20.0, 10.0]];

        let by_name = vi("NDVI", &[&red, &nir], &IndexParams::new()).unwrap();
        let direct = indices::ndvi(&red, &nir, Scale::default()).unwrap();
        assert_eq!(by_name, direct);
    }

    #[test]
    fn test_vi_passes_constants() {
        let red = make_band(3, 3, 0.1);
        let nir = make_band(3, 3, 0.5);

        let params = IndexParams::new().with("L", 0.25).unwrap();
        let by_name = vi("savi", &[&red, &nir], &params).unwrap();
        let direct = indices::savi(&red, &nir, SaviParams { l_factor: 0.25 }, Scale::default())
            .unwrap();
        assert_eq!(by_name, direct);
    }

    #[test]
    fn test_vi_constant_overrides() {
        let blue = make_band(2, 2, 0.05);
        let green = make_band(2, 2, 0.1);
        let red = make_band(2, 2, 0.08);
        let nir = make_band(2, 2, 0.5);
        let s = Scale::default();

        let gari_bands: [&dyn AsBand; 4] = [&blue, &green, &red, &nir];
        let tuned = vi("gari", &gari_bands, &IndexParams::new().with("y", 1.0).unwrap()).unwrap();
        let default = vi("gari", &gari_bands, &IndexParams::new()).unwrap();
        assert_ne!(tuned, default);
        assert_eq!(
            tuned,
            indices::gari(&blue, &green, &red, &nir, GariParams { gamma: 1.0 }, s).unwrap()
        );

        let params = IndexParams::new()
            .with("m", 0.8)
            .and_then(|p| p.with("b", 0.02))
            .unwrap();
        let tuned = vi("tsavi", &[&red, &nir], &params).unwrap();
        assert_ne!(tuned, vi("tsavi", &[&red, &nir], &IndexParams::new()).unwrap());
        let soil = TsaviParams {
            slope: 0.8,
            intercept: 0.02,
        };
        assert_eq!(tuned, indices::tsavi(&red, &nir, soil, s).unwrap());

        let tuned = vi("gosavi", &[&green, &nir], &IndexParams::new().with("L", 0.4).unwrap())
            .unwrap();
        assert_ne!(tuned, vi("gosavi", &[&green, &nir], &IndexParams::new()).unwrap());
        assert_eq!(
            tuned,
            indices::gosavi(&green, &nir, GosaviParams { l_factor: 0.4 }, s).unwrap()
        );
    }

    #[test]
    fn test_vi_passes_scale() {
        let red = make_band(2, 2, 0.2);
        let nir = make_band(2, 2, 0.6);

        let params = IndexParams::new()
            .with("bound_low", 0)
            .and_then(|p| p.with("bound_high", 2))
            .unwrap();
        let out = vi("sr", &[&red, &nir], &params).unwrap();
        assert!(out.iter().all(|&v| v == 2.0));
    }

    #[test]
    fn test_vi_rejects_foreign_constant() {
        let red = make_band(2, 2, 0.2);
        let nir = make_band(2, 2, 0.6);

        let params = IndexParams::new().with("y", 1.0).unwrap();
        let err = vi("ndvi", &[&red, &nir], &params).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { ref name, .. } if name == "y"));
    }

    #[test]
    fn test_vi_wrong_band_count() {
        let red = make_band(2, 2, 0.2);
        let err = vi("evi", &[&red, &red], &IndexParams::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
    }

    #[test]
    fn test_unknown_parameter_name() {
        let mut params = IndexParams::new();
        assert!(params.set("gamma", 1.0).is_err());
        assert!(params.set_str("l", "abc").is_err());
        params.set_str("C1", "3.5").unwrap();
        assert_eq!(params.c1, Some(3.5));
    }

    #[test]
    fn test_every_index_all_zero_inputs() {
        let zero = make_band(4, 5, 0.0);
        for index in SpectralIndex::ALL {
            let bands: Vec<&dyn AsBand> = index.bands().iter().map(|_| &zero as &dyn AsBand).collect();
            let out = index.compute(&bands, &IndexParams::new()).unwrap();
            assert_eq!(out.dim(), (4, 5), "{} changed shape", index);
            assert!(out.iter().all(|v| v.is_finite()), "{} produced non-finite", index);
        }
    }

    #[test]
    fn test_band_kind_names() {
        assert_eq!(SpectralIndex::ALL.len(), 30);
        assert_eq!(BandKind::RedEdge.name(), "red_edge");
        assert_eq!("NIR".parse::<BandKind>().unwrap(), BandKind::Nir);
    }
}
