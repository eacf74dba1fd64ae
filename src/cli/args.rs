use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::CoordinateFormat;
use crate::utils::constants::SAMPLE_CSV_FILENAME;

#[derive(Parser)]
#[command(name = "coordinate-converter")]
#[command(about = "Survey-grade WGS 84 to UTM coordinate converter")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(
        short,
        long,
        global = true,
        help = "Settings file [default: converter.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP service and web UI
    Serve {
        #[arg(long, help = "Bind address (overrides settings)")]
        host: Option<String>,

        #[arg(short, long, help = "Port (overrides settings)")]
        port: Option<u16>,

        #[arg(short, long, help = "Worker count, 0 = one per CPU")]
        workers: Option<usize>,
    },

    /// Convert one WGS 84 point to easting/northing
    Convert {
        #[arg(long, allow_hyphen_values = true, help = "Latitude, e.g. -1.2833 or 1°17'00\"S")]
        lat: String,

        #[arg(long, allow_hyphen_values = true, help = "Longitude, e.g. 36.8167 or 36°49'00\"E")]
        lon: String,

        #[arg(long, help = "Latitude notation [default: detected]")]
        lat_format: Option<CoordinateFormat>,

        #[arg(long, help = "Longitude notation [default: detected]")]
        lon_format: Option<CoordinateFormat>,

        #[arg(short, long, help = "Target EPSG code [default: from settings]")]
        epsg: Option<u32>,
    },

    /// Convert easting/northing back to WGS 84
    Reverse {
        #[arg(long)]
        easting: f64,

        #[arg(long)]
        northing: f64,

        #[arg(short, long, help = "Source EPSG code [default: from settings]")]
        epsg: Option<u32>,
    },

    /// Convert every row of a CSV file
    Batch {
        #[arg(short, long, help = "Input CSV with latitude/longitude columns")]
        input: PathBuf,

        #[arg(
            short,
            long,
            help = "Output CSV path [default: converted_{input} next to the input]"
        )]
        output: Option<PathBuf>,

        #[arg(short, long, help = "Target EPSG code [default: from settings]")]
        epsg: Option<u32>,
    },

    /// Write the sample input CSV
    Sample {
        #[arg(short, long, default_value = SAMPLE_CSV_FILENAME)]
        output: PathBuf,
    },
}
