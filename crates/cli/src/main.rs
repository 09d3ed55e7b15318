//! Vegi CLI - vegetation indices and pansharpening for GeoTIFF bands

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use vegi_algorithms::imagery::{
    convert_16bit_to_8bit, convert_8bit_to_16bit, pansharpen, AsBand, BandKind, IndexParams,
    PansharpenMethod, PansharpenParams, SpectralIndex,
};
use vegi_core::io::{read_geotiff, write_geotiff};
use vegi_core::{Raster, RasterElement};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "vegi")]
#[command(author, version, about = "Vegetation indices and pansharpening", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a raster file
    Info {
        /// Input raster file
        input: PathBuf,
    },
    /// List every available index with its bands and range
    List,
    /// Compute a spectral index
    Index {
        /// Index name (case-insensitive), e.g. ndvi, SAVI, msavi2
        name: String,
        /// Input band as KIND=PATH (kinds: blue, green, red, red_edge, nir, thermal)
        #[arg(short, long = "band", value_parser = parse_band, required = true)]
        bands: Vec<(BandKind, PathBuf)>,
        /// Lower end of the range remapped onto [0, 1]
        #[arg(long, allow_hyphen_values = true)]
        low: Option<f32>,
        /// Upper end of the range remapped onto [0, 1]
        #[arg(long, allow_hyphen_values = true)]
        high: Option<f32>,
        /// Clip output below this value (needs --clip-max)
        #[arg(long, allow_hyphen_values = true, requires = "clip_max")]
        clip_min: Option<f32>,
        /// Clip output above this value (needs --clip-min)
        #[arg(long, allow_hyphen_values = true, requires = "clip_min")]
        clip_max: Option<f32>,
        /// Index constant as NAME=VALUE, e.g. L=0.25 or C1=6
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
        /// Output file
        output: PathBuf,
    },
    /// Sharpen an RGB image with a panchromatic band
    Pansharpen {
        /// Red channel
        #[arg(long)]
        red: PathBuf,
        /// Green channel
        #[arg(long)]
        green: PathBuf,
        /// Blue channel
        #[arg(long)]
        blue: PathBuf,
        /// Panchromatic band, resampled to the RGB grid
        #[arg(long)]
        pan: PathBuf,
        /// Method: browley, simple_browley, sample_mean, esri
        #[arg(short, long, default_value = "browley")]
        method: String,
        /// Channel weight for the browley method
        #[arg(short, long, default_value = "0.1")]
        weight: f32,
        /// Output red channel
        out_red: PathBuf,
        /// Output green channel
        out_green: PathBuf,
        /// Output blue channel
        out_blue: PathBuf,
    },
    /// Convert sample depth between 8 and 16 bits
    Convert {
        /// Target depth: 8 or 16
        #[arg(short, long, value_parser = clap::builder::PossibleValuesParser::new(["8", "16"]))]
        to: String,
        /// Input raster file
        input: PathBuf,
        /// Output file
        output: PathBuf,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install log subscriber")
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn read_band(path: &Path) -> Result<Raster<f32>> {
    let pb = spinner("Reading raster...");
    let raster: Raster<f32> = read_geotiff(path)
        .with_context(|| format!("Failed to read raster {}", path.display()))?;
    pb.finish_and_clear();
    info!("Input: {} x {} ({})", raster.cols(), raster.rows(), path.display());
    Ok(raster)
}

fn write_result<T: RasterElement>(raster: &Raster<T>, path: &Path) -> Result<()> {
    let pb = spinner("Writing output...");
    write_geotiff(raster, path)
        .with_context(|| format!("Failed to write output {}", path.display()))?;
    pb.finish_and_clear();
    Ok(())
}

fn done(name: &str, path: &Path, elapsed: std::time::Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}

fn parse_band(s: &str) -> std::result::Result<(BandKind, PathBuf), String> {
    let (kind, path) = s
        .split_once('=')
        .ok_or_else(|| format!("band must be KIND=PATH, got: {}", s))?;
    let kind: BandKind = kind.trim().parse().map_err(|e| format!("{}", e))?;
    Ok((kind, PathBuf::from(path.trim())))
}

fn parse_param(s: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("parameter must be NAME=VALUE, got: {}", s))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

fn build_params(
    low: Option<f32>,
    high: Option<f32>,
    clip: Option<(f32, f32)>,
    constants: &[(String, String)],
) -> Result<IndexParams> {
    let mut params = IndexParams::new();
    params.scale.low = low;
    params.scale.high = high;
    if let Some((min, max)) = clip {
        params.scale = params.scale.clipped(min, max);
    }
    for (name, value) in constants {
        params
            .set_str(name, value)
            .with_context(|| format!("Invalid parameter {}={}", name, value))?;
    }
    Ok(params)
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    match cli.command {
        // ── Info ─────────────────────────────────────────────────────
        Commands::Info { input } => {
            let raster = read_band(&input)?;
            let (rows, cols) = raster.shape();
            let bounds = raster.bounds();
            let transform = raster.transform();
            let stats = raster.statistics();

            println!("File: {}", input.display());
            println!("Dimensions: {} x {} ({} cells)", cols, rows, raster.len());
            println!(
                "Origin: ({:.6}, {:.6})  Pixel: {} x {}",
                transform.origin_x,
                transform.origin_y,
                transform.pixel_width,
                transform.pixel_height
            );
            println!(
                "Bounds: ({:.6}, {:.6}) - ({:.6}, {:.6})",
                bounds.0, bounds.1, bounds.2, bounds.3
            );
            if let Some(nodata) = raster.nodata() {
                println!("NoData: {}", nodata);
            }
            println!("\nStatistics:");
            if let Some(min) = stats.min {
                println!("  Min: {:.4}", min);
            }
            if let Some(max) = stats.max {
                println!("  Max: {:.4}", max);
            }
            if let Some(mean) = stats.mean {
                println!("  Mean: {:.4}", mean);
            }
            if !raster.is_empty() {
                println!(
                    "  Valid cells: {} ({:.1}%)",
                    stats.valid_count,
                    100.0 * stats.valid_count as f64 / raster.len() as f64
                );
            }
        }

        // ── List ─────────────────────────────────────────────────────
        Commands::List => {
            println!("{:<8} {:<28} {:<9} {:<12} EQUATION", "INDEX", "BANDS", "RANGE", "PARAMS");
            for index in SpectralIndex::ALL {
                let bands: Vec<&str> = index.bands().iter().map(BandKind::name).collect();
                let (low, high) = index.natural_range();
                println!(
                    "{:<8} {:<28} {:<9} {:<12} {}",
                    index.name(),
                    bands.join(","),
                    format!("[{}, {}]", low, high),
                    index.constants().join(","),
                    index.equation()
                );
            }
        }

        // ── Index ────────────────────────────────────────────────────
        Commands::Index {
            name,
            bands,
            low,
            high,
            clip_min,
            clip_max,
            params,
            output,
        } => {
            let index: SpectralIndex = name.parse().context("Unknown index")?;
            let params = build_params(low, high, clip_min.zip(clip_max), &params)?;
            debug!("{} with {:?}", index, params);

            let mut rasters = Vec::with_capacity(index.bands().len());
            for kind in index.bands() {
                let path = bands
                    .iter()
                    .find(|(k, _)| k == kind)
                    .map(|(_, p)| p)
                    .with_context(|| {
                        format!("{} needs a {} band (--band {}=PATH)", index, kind, kind)
                    })?;
                rasters.push(read_band(path)?);
            }
            let refs: Vec<&dyn AsBand> = rasters.iter().map(|r| r as &dyn AsBand).collect();

            let start = Instant::now();
            let result = index
                .compute(&refs, &params)
                .with_context(|| format!("Failed to calculate {}", index))?;
            let elapsed = start.elapsed();

            let template = rasters.first().context("Index takes no bands")?;
            let out = template.with_data(result)?;
            write_result(&out, &output)?;
            done(&index.name().to_uppercase(), &output, elapsed);
        }

        // ── Pansharpen ───────────────────────────────────────────────
        Commands::Pansharpen {
            red,
            green,
            blue,
            pan,
            method,
            weight,
            out_red,
            out_green,
            out_blue,
        } => {
            let method: PansharpenMethod = method.parse().context("Unknown method")?;
            let r = read_band(&red)?;
            let g = read_band(&green)?;
            let b = read_band(&blue)?;
            let p = read_band(&pan)?;

            let start = Instant::now();
            let (sr, sg, sb) = pansharpen(&r, &g, &b, &p, PansharpenParams { method, weight })
                .context("Failed to pansharpen")?;
            let elapsed = start.elapsed();

            write_result(&p.with_data(sr)?, &out_red)?;
            write_result(&p.with_data(sg)?, &out_green)?;
            write_result(&p.with_data(sb)?, &out_blue)?;
            done("Red", &out_red, elapsed);
            done("Green", &out_green, elapsed);
            done("Blue", &out_blue, elapsed);
        }

        // ── Convert ──────────────────────────────────────────────────
        Commands::Convert { to, input, output } => {
            let raster = read_band(&input)?;
            let start = Instant::now();
            if to == "16" {
                let data = convert_8bit_to_16bit(&raster).context("Failed to convert")?;
                let elapsed = start.elapsed();
                write_result(&raster.with_data(data)?, &output)?;
                done("16-bit raster", &output, elapsed);
            } else {
                let data = convert_16bit_to_8bit(&raster).context("Failed to convert")?;
                let elapsed = start.elapsed();
                write_result(&raster.with_data(data)?, &output)?;
                done("8-bit raster", &output, elapsed);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_band() {
        let (kind, path) = parse_band("NIR=scene/b8.tif").unwrap();
        assert_eq!(kind, BandKind::Nir);
        assert_eq!(path, PathBuf::from("scene/b8.tif"));

        assert!(parse_band("b8.tif").is_err());
        assert!(parse_band("swir=b11.tif").is_err());
    }

    #[test]
    fn test_build_params() {
        let constants = vec![("L".to_string(), "0.25".to_string())];
        let params = build_params(Some(-1.0), None, Some((0.0, 1.0)), &constants).unwrap();
        assert_eq!(params.l, Some(0.25));
        assert_eq!(params.scale.low, Some(-1.0));
        assert_eq!(params.scale.high, None);
        assert_eq!(params.scale.clip.limits(), Some((0.0, 1.0)));

        let bad = vec![("L".to_string(), "wide".to_string())];
        assert!(build_params(None, None, None, &bad).is_err());
    }

    #[test]
    fn test_cli_parses_index_command() {
        let cli = Cli::try_parse_from([
            "vegi", "index", "savi", "-b", "red=r.tif", "--band", "nir=n.tif", "-p", "L=0.3",
            "--clip-min", "-1", "--clip-max", "1", "out.tif",
        ])
        .unwrap();
        match cli.command {
            Commands::Index {
                name,
                bands,
                params,
                clip_min,
                ..
            } => {
                assert_eq!(name, "savi");
                assert_eq!(bands.len(), 2);
                assert_eq!(params, vec![("L".to_string(), "0.3".to_string())]);
                assert_eq!(clip_min, Some(-1.0));
            }
            _ => panic!("expected index command"),
        }
    }
}
