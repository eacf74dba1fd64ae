use csv::{Terminator, WriterBuilder};
use std::fs;
use std::path::Path;

use crate::error::{ConverterError, Result};
use crate::models::BatchRecord;
use crate::utils::constants::UTF8_BOM;

const SAMPLE_ROWS: &[[&str; 4]] = &[
    ["-1.2833", "36.8167", "dd", "dd"],
    ["1°17'00\"S", "36°49'00\"E", "dms", "dms"],
    ["1°17.0'S", "36°49.0'E", "dm", "dm"],
    ["-4.0500", "39.6667", "dd", "dd"],
    ["0.3167", "32.5833", "dd", "dd"],
];

/// Writes batch results as UTF-8 CSV with a BOM so spreadsheet tools pick up the encoding.
pub struct CsvWriter {
    include_bom: bool,
}

impl CsvWriter {
    pub fn new() -> Self {
        Self::with_bom(true)
    }

    pub fn with_bom(include_bom: bool) -> Self {
        Self { include_bom }
    }

    pub fn write_records(&self, records: &[BatchRecord]) -> Result<Vec<u8>> {
        let mut writer = self.builder().from_writer(self.buffer());
        for record in records {
            writer.serialize(record)?;
        }
        if records.is_empty() {
            writer.write_record([
                "input_latitude",
                "input_longitude",
                "easting",
                "northing",
                "status",
            ])?;
        }
        writer
            .into_inner()
            .map_err(|e| ConverterError::Io(e.into_error()))
    }

    pub fn write_records_to_path(&self, records: &[BatchRecord], path: &Path) -> Result<()> {
        let bytes = self.write_records(records)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Template CSV covering all three notations.
    pub fn sample_csv(&self) -> Result<Vec<u8>> {
        let mut writer = self.builder().from_writer(self.buffer());
        writer.write_record(["latitude", "longitude", "lat_format", "lon_format"])?;
        for row in SAMPLE_ROWS {
            writer.write_record(row)?;
        }
        writer
            .into_inner()
            .map_err(|e| ConverterError::Io(e.into_error()))
    }

    fn builder(&self) -> WriterBuilder {
        let mut builder = WriterBuilder::new();
        builder.terminator(Terminator::Any(b'\n'));
        builder
    }

    fn buffer(&self) -> Vec<u8> {
        if self.include_bom {
            UTF8_BOM.to_vec()
        } else {
            Vec::new()
        }
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}
