//! Sample types a band can hold

use num_traits::{NumCast, ToPrimitive, Zero};
use std::fmt::Debug;

/// Trait for types that can be stored in a band cell.
///
/// Covers the integer depths produced by common sensors (8, 14 and
/// 16-bit counts) and floating point reflectance.
pub trait RasterElement:
    Copy + Debug + PartialOrd + NumCast + ToPrimitive + Zero + Send + Sync + 'static
{
    /// Default no-data value for this type
    fn default_nodata() -> Self;

    /// Whether this type is a floating point type
    fn is_float() -> bool;

    /// Check if this value represents no-data
    fn is_nodata(&self, nodata: Option<Self>) -> bool;

    /// Single-precision view of the sample, `None` if not representable
    fn to_sample(self) -> Option<f32> {
        ToPrimitive::to_f32(&self)
    }

    /// Convert a single-precision sample back into this type
    fn from_sample(value: f32) -> Option<Self> {
        NumCast::from(value)
    }
}

macro_rules! impl_raster_element_int {
    ($t:ty) => {
        impl RasterElement for $t {
            fn default_nodata() -> Self {
                <$t>::MIN
            }

            fn is_float() -> bool {
                false
            }

            fn is_nodata(&self, nodata: Option<Self>) -> bool {
                nodata == Some(*self)
            }
        }
    };
}

macro_rules! impl_raster_element_float {
    ($t:ty) => {
        impl RasterElement for $t {
            fn default_nodata() -> Self {
                <$t>::NAN
            }

            fn is_float() -> bool {
                true
            }

            fn is_nodata(&self, nodata: Option<Self>) -> bool {
                if self.is_nan() {
                    return true;
                }
                match nodata {
                    Some(nd) => (self - nd).abs() < <$t>::EPSILON * 100.0,
                    None => false,
                }
            }
        }
    };
}

impl_raster_element_int!(i8);
impl_raster_element_int!(i16);
impl_raster_element_int!(i32);
impl_raster_element_int!(u8);
impl_raster_element_int!(u16);
impl_raster_element_int!(u32);
impl_raster_element_float!(f32);
impl_raster_element_float!(f64);
