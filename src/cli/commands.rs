use anyhow::{Context, Result};
use std::fs;

use crate::cli::args::{Cli, Commands};
use crate::config::Settings;
use crate::models::{ConversionRequest, CoordinateFormat, ReverseConversionRequest};
use crate::processors::{BatchProcessor, CoordinateConverter};
use crate::readers::CsvReader;
use crate::server::run_server;
use crate::utils::filename::default_batch_output;
use crate::utils::logging::init_logging;
use crate::utils::progress::ProgressReporter;
use crate::writers::CsvWriter;

pub async fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;

    if let Commands::Serve {
        ref host,
        port,
        workers,
    } = cli.command
    {
        if let Some(host) = host {
            settings.host = host.clone();
        }
        if let Some(port) = port {
            settings.port = port;
        }
        if let Some(workers) = workers {
            settings.workers = workers;
        }
        settings.check()?;
    }

    init_logging(&settings, cli.verbose).context("Failed to initialise logging")?;

    match cli.command {
        Commands::Serve { .. } => {
            run_server(settings).await?;
        }

        Commands::Convert {
            lat,
            lon,
            lat_format,
            lon_format,
            epsg,
        } => {
            let converter = CoordinateConverter::new(settings.target_epsg)?;
            let request = ConversionRequest {
                lat_format: resolve_format(lat_format, &lat)?,
                lon_format: resolve_format(lon_format, &lon)?,
                latitude: lat,
                longitude: lon,
                target_epsg: epsg,
            };
            let response = converter
                .convert_point(&request)
                .with_context(|| format!("Could not convert ({}, {})", request.latitude, request.longitude))?;

            println!("EPSG:{}", response.epsg);
            println!("Easting:  {:.3}", response.easting);
            println!("Northing: {:.3}", response.northing);
        }

        Commands::Reverse {
            easting,
            northing,
            epsg,
        } => {
            let converter = CoordinateConverter::new(settings.target_epsg)?;
            let response = converter.convert_reverse(&ReverseConversionRequest {
                easting,
                northing,
                source_epsg: epsg,
            })?;

            println!("Latitude:  {:.6}  {}", response.latitude, response.latitude_dms);
            println!("Longitude: {:.6}  {}", response.longitude, response.longitude_dms);
        }

        Commands::Batch {
            input,
            output,
            epsg,
        } => {
            let output = output.unwrap_or_else(|| default_batch_output(&input));
            println!("Converting {}", input.display());

            let rows = CsvReader::new()
                .read_path(&input)
                .with_context(|| format!("Could not read {}", input.display()))?;

            let converter = CoordinateConverter::new(settings.target_epsg)?;
            let progress = ProgressReporter::new(rows.len() as u64, "Converting rows...", false);
            let records = BatchProcessor::new(&converter)
                .with_target_epsg(epsg)
                .convert_rows(&rows, Some(&progress))?;

            let succeeded = records.iter().filter(|r| r.is_success()).count();
            progress.finish_with_message(&format!(
                "Converted {}/{} rows",
                succeeded,
                records.len()
            ));

            CsvWriter::new().write_records_to_path(&records, &output)?;
            println!("Output written to {}", output.display());

            let failed = records.len() - succeeded;
            if failed > 0 {
                println!("{} rows failed; see the status column for details", failed);
            }
        }

        Commands::Sample { output } => {
            let bytes = CsvWriter::new().sample_csv()?;
            fs::write(&output, bytes)
                .with_context(|| format!("Could not write {}", output.display()))?;
            println!("Sample CSV written to {}", output.display());
        }
    }

    Ok(())
}

fn resolve_format(explicit: Option<CoordinateFormat>, value: &str) -> Result<CoordinateFormat> {
    match explicit {
        Some(format) => Ok(format),
        None => Ok(CoordinateFormat::detect(value)?),
    }
}
