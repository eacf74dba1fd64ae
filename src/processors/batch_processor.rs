use tracing::{info, warn};

use crate::error::{ConverterError, Result};
use crate::geodesy::Transformer;
use crate::models::{BatchRecord, BatchRow, BatchSummary, CoordinateFormat, ProjectedPoint};
use crate::processors::coordinate_converter::{project_with, CoordinateConverter};
use crate::readers::CsvReader;
use crate::utils::progress::ProgressReporter;
use crate::writers::CsvWriter;

/// Output of a batch run: the CSV bytes plus counts for logging and reporting.
#[derive(Debug, Clone)]
pub struct BatchOutput {
    pub csv: Vec<u8>,
    pub records: Vec<BatchRecord>,
    pub summary: BatchSummary,
}

/// Converts every row of an uploaded CSV independently; a bad row never fails the batch.
pub struct BatchProcessor<'a> {
    converter: &'a CoordinateConverter,
    target_epsg: Option<u32>,
}

impl<'a> BatchProcessor<'a> {
    pub fn new(converter: &'a CoordinateConverter) -> Self {
        Self {
            converter,
            target_epsg: None,
        }
    }

    pub fn with_target_epsg(mut self, target_epsg: Option<u32>) -> Self {
        self.target_epsg = target_epsg;
        self
    }

    /// Decode, convert and re-encode a CSV upload.
    pub fn process_bytes(
        &self,
        bytes: &[u8],
        filename: &str,
        progress: Option<&ProgressReporter>,
    ) -> Result<BatchOutput> {
        info!("Batch conversion started for file: {}", filename);

        let rows = CsvReader::new().read_bytes(bytes)?;
        let records = self.convert_rows(&rows, progress)?;
        let csv = CsvWriter::new().write_records(&records)?;
        let summary = BatchSummary::from_records(filename, &records);

        info!(
            "Batch conversion completed. Successful: {}/{}",
            summary.success_count, summary.record_count
        );

        Ok(BatchOutput {
            csv,
            records,
            summary,
        })
    }

    pub fn convert_rows(
        &self,
        rows: &[BatchRow],
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<BatchRecord>> {
        let transformer = self.converter.transformer_for(self.target_epsg)?;

        let records = rows
            .iter()
            .map(|row| {
                let record = match self.convert_row(&transformer, row) {
                    Ok(point) => BatchRecord::success(row, point.easting, point.northing),
                    Err(e) => {
                        warn!("Row {} failed: {}", row.line, e);
                        BatchRecord::failure(row, e)
                    }
                };
                if let Some(progress) = progress {
                    progress.increment(1);
                }
                record
            })
            .collect();

        Ok(records)
    }

    fn convert_row(&self, transformer: &Transformer, row: &BatchRow) -> Result<ProjectedPoint> {
        if let Some(ref cell) = row.format_error {
            return Err(ConverterError::UnsupportedFormat(cell.clone()));
        }

        let lat_format = match row.lat_format {
            Some(format) => format,
            None => CoordinateFormat::detect(&row.latitude)?,
        };
        let lon_format = match row.lon_format {
            Some(format) => format,
            None => CoordinateFormat::detect(&row.longitude)?,
        };

        let point =
            self.converter
                .parse_point(&row.latitude, lat_format, &row.longitude, lon_format)?;
        project_with(transformer, point)
    }
}
