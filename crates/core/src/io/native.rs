//! Native GeoTIFF reading/writing
//!
//! Uses the `tiff` crate. Only the first image of a file is read, and only
//! the pixel-scale/tiepoint georeferencing tags are interpreted.

use crate::error::{Error, Result};
use crate::raster::{GeoTransform, Raster, RasterElement};
use num_traits::NumCast;
use std::fs::File;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::colortype::Gray32Float;
use tiff::encoder::TiffEncoder;
use tiff::tags::Tag;

const MODEL_PIXEL_SCALE_TAG: u16 = 33550;
const MODEL_TIEPOINT_TAG: u16 = 33922;
const GEO_KEY_DIRECTORY_TAG: u16 = 34735;
/// ASCII no-data value, as written by GDAL
const GDAL_NODATA_TAG: u16 = 42113;

/// Read a single-band GeoTIFF file into a Raster
pub fn read_geotiff<T, P>(path: P) -> Result<Raster<T>>
where
    T: RasterElement,
    P: AsRef<Path>,
{
    let file = File::open(path.as_ref())?;
    decode_geotiff(file)
}

/// Read a GeoTIFF from an in-memory buffer into a Raster
pub fn read_geotiff_from_buffer<T: RasterElement>(data: &[u8]) -> Result<Raster<T>> {
    decode_geotiff(Cursor::new(data))
}

fn cast_samples<S, T>(buf: &[S]) -> Vec<T>
where
    S: NumCast + Copy,
    T: RasterElement,
{
    buf.iter()
        .map(|&v| num_traits::cast(v).unwrap_or(T::default_nodata()))
        .collect()
}

fn decode_geotiff<T, R>(reader: R) -> Result<Raster<T>>
where
    T: RasterElement,
    R: Read + Seek,
{
    let mut decoder =
        Decoder::new(reader).map_err(|e| Error::Other(format!("TIFF decode error: {}", e)))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| Error::Other(format!("Cannot read dimensions: {}", e)))?;

    let rows = height as usize;
    let cols = width as usize;

    let result = decoder
        .read_image()
        .map_err(|e| Error::Other(format!("Cannot read image data: {}", e)))?;

    let data: Vec<T> = match result {
        DecodingResult::U8(buf) => cast_samples(&buf),
        DecodingResult::U16(buf) => cast_samples(&buf),
        DecodingResult::U32(buf) => cast_samples(&buf),
        DecodingResult::I8(buf) => cast_samples(&buf),
        DecodingResult::I16(buf) => cast_samples(&buf),
        DecodingResult::I32(buf) => cast_samples(&buf),
        DecodingResult::F32(buf) => cast_samples(&buf),
        DecodingResult::F64(buf) => cast_samples(&buf),
        _ => {
            return Err(Error::UnsupportedDataType(
                "Unsupported TIFF pixel format".to_string(),
            ))
        }
    };

    // Multi-sample (RGB) images decode to rows * cols * samples values
    if data.len() != rows * cols {
        return Err(Error::InvalidDimensions {
            width: cols,
            height: rows,
        });
    }

    let mut raster = Raster::from_vec(data, rows, cols)?;
    if let Some(transform) = read_geotransform(&mut decoder) {
        raster.set_transform(transform);
    }
    raster.set_nodata(read_nodata(&mut decoder));

    Ok(raster)
}

fn read_geotransform<R: Read + Seek>(decoder: &mut Decoder<R>) -> Option<GeoTransform> {
    let scale = decoder
        .get_tag_f64_vec(Tag::from_u16_exhaustive(MODEL_PIXEL_SCALE_TAG))
        .ok()?;
    let tiepoint = decoder
        .get_tag_f64_vec(Tag::from_u16_exhaustive(MODEL_TIEPOINT_TAG))
        .ok()?;
    GeoTransform::from_tiff_tags(&scale, &tiepoint)
}

fn read_nodata<T: RasterElement, R: Read + Seek>(decoder: &mut Decoder<R>) -> Option<T> {
    let text = decoder
        .get_tag_ascii_string(Tag::from_u16_exhaustive(GDAL_NODATA_TAG))
        .ok()?;
    parse_nodata(&text)
}

fn parse_nodata<T: RasterElement>(text: &str) -> Option<T> {
    let value: f32 = text.trim_matches(char::from(0)).trim().parse().ok()?;
    T::from_sample(value)
}

/// Write a Raster to a GeoTIFF file as 32-bit float
pub fn write_geotiff<T, P>(raster: &Raster<T>, path: P) -> Result<()>
where
    T: RasterElement,
    P: AsRef<Path>,
{
    let file = File::create(path.as_ref())?;
    encode_geotiff(raster, file)
}

/// Write a Raster to an in-memory GeoTIFF buffer
pub fn write_geotiff_to_buffer<T: RasterElement>(raster: &Raster<T>) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_geotiff(raster, Cursor::new(&mut buf))?;
    Ok(buf)
}

fn encode_geotiff<T, W>(raster: &Raster<T>, writer: W) -> Result<()>
where
    T: RasterElement,
    W: Write + Seek,
{
    let mut encoder =
        TiffEncoder::new(writer).map_err(|e| Error::Other(format!("TIFF encoder error: {}", e)))?;

    let (rows, cols) = raster.shape();
    let data: Vec<f32> = raster
        .data()
        .iter()
        .map(|&v| v.to_sample().unwrap_or(f32::NAN))
        .collect();

    let mut image = encoder
        .new_image::<Gray32Float>(cols as u32, rows as u32)
        .map_err(|e| Error::Other(format!("Cannot create TIFF image: {}", e)))?;

    let gt = raster.transform();
    image
        .encoder()
        .write_tag(Tag::Unknown(MODEL_PIXEL_SCALE_TAG), &gt.pixel_scale_tag()[..])
        .map_err(|e| Error::Other(format!("Cannot write scale tag: {}", e)))?;
    image
        .encoder()
        .write_tag(Tag::Unknown(MODEL_TIEPOINT_TAG), &gt.tiepoint_tag()[..])
        .map_err(|e| Error::Other(format!("Cannot write tiepoint tag: {}", e)))?;

    // Version 1.1.0 with two keys: GTModelTypeGeoKey = projected,
    // GTRasterTypeGeoKey = pixel is area
    let geokeys: [u16; 12] = [1, 1, 0, 2, 1024, 0, 1, 1, 1025, 0, 1, 1];
    image
        .encoder()
        .write_tag(Tag::Unknown(GEO_KEY_DIRECTORY_TAG), &geokeys[..])
        .map_err(|e| Error::Other(format!("Cannot write geokey tag: {}", e)))?;

    if let Some(nodata) = raster.nodata() {
        let text = nodata.to_sample().unwrap_or(f32::NAN).to_string();
        image
            .encoder()
            .write_tag(Tag::Unknown(GDAL_NODATA_TAG), text.as_str())
            .map_err(|e| Error::Other(format!("Cannot write nodata tag: {}", e)))?;
    }

    image
        .write_data(&data)
        .map_err(|e| Error::Other(format!("Cannot write image data: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_roundtrip_keeps_values_and_transform() {
        let mut nir: Raster<u16> = Raster::new(4, 6);
        for row in 0..4 {
            for col in 0..6 {
                nir.set(row, col, (row * 1000 + col * 10) as u16).unwrap();
            }
        }
        nir.set_transform(GeoTransform::new(500_000.0, 4_000_000.0, 10.0, -10.0));

        let bytes = write_geotiff_to_buffer(&nir).unwrap();
        let back: Raster<f32> = read_geotiff_from_buffer(&bytes).unwrap();

        assert_eq!(back.shape(), (4, 6));
        assert_eq!(*back.transform(), *nir.transform());
        assert_eq!(back.get(3, 5).unwrap(), 3050.0);
        assert_eq!(back.get(0, 0).unwrap(), 0.0);
    }

    #[test]
    fn test_file_roundtrip() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let band: Raster<f32> = Raster::filled(3, 3, 0.25);

        write_geotiff(&band, tmp.path()).unwrap();
        let back: Raster<f32> = read_geotiff(tmp.path()).unwrap();

        assert_eq!(back.shape(), (3, 3));
        assert!((back.get(1, 1).unwrap() - 0.25).abs() < 1e-7);
    }

    #[test]
    fn test_nodata_roundtrip() {
        let mut band: Raster<u16> = Raster::filled(2, 2, 800);
        band.set(0, 0, 0).unwrap();
        band.set_nodata(Some(0));

        let back: Raster<f32> =
            read_geotiff_from_buffer(&write_geotiff_to_buffer(&band).unwrap()).unwrap();
        assert_eq!(back.nodata(), Some(0.0));
        assert_eq!(back.statistics().valid_count, 3);

        let mut float_band: Raster<f32> = Raster::filled(2, 2, 0.5);
        float_band.set_nodata(Some(f32::NAN));
        let back: Raster<f32> =
            read_geotiff_from_buffer(&write_geotiff_to_buffer(&float_band).unwrap()).unwrap();
        assert!(back.nodata().is_some_and(f32::is_nan));
    }

    #[test]
    fn test_missing_nodata_tag() {
        let band: Raster<f32> = Raster::filled(2, 2, 1.0);
        let back: Raster<f32> =
            read_geotiff_from_buffer(&write_geotiff_to_buffer(&band).unwrap()).unwrap();
        assert_eq!(back.nodata(), None);
    }

    #[test]
    fn test_parse_nodata_text() {
        assert_eq!(parse_nodata::<f32>("-9999\0"), Some(-9999.0));
        assert_eq!(parse_nodata::<u8>(" 255 "), Some(255));
        assert_eq!(parse_nodata::<u8>("-1"), None);
        assert_eq!(parse_nodata::<f32>("none"), None);
    }

    #[test]
    fn test_garbage_buffer_is_error() {
        assert!(read_geotiff_from_buffer::<f32>(b"not a tiff").is_err());
    }
}
