use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{ConverterError, Result};
use crate::models::{BatchRow, CoordinateFormat};

/// Mis-decoded byte sequences seen in spreadsheet exports, longest first.
const CLEANING_REPLACEMENTS: &[(&str, &str)] = &[
    ("Ã‚Â°", "°"),
    ("Â°", "°"),
    ("â€¯", " "),
    ("â€™", "'"),
];

const LATITUDE_ALIASES: &[&str] = &["latitude", "lat", "y"];
const LONGITUDE_ALIASES: &[&str] = &["longitude", "lon", "lng", "long", "x"];
const LAT_FORMAT_ALIASES: &[&str] = &["lat_format", "latitude_format", "lat_fmt"];
const LON_FORMAT_ALIASES: &[&str] = &["lon_format", "longitude_format", "lon_fmt", "lng_format"];

/// Column positions resolved from a CSV header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub latitude: usize,
    pub longitude: usize,
    pub lat_format: Option<usize>,
    pub lon_format: Option<usize>,
}

impl ColumnMap {
    /// Resolve columns by case-insensitive alias lookup.
    pub fn detect(headers: &StringRecord) -> Result<Self> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
            .collect();

        let find = |aliases: &[&str]| {
            aliases
                .iter()
                .find_map(|alias| normalized.iter().position(|h| h.as_str() == *alias))
        };

        let latitude = find(LATITUDE_ALIASES);
        let longitude = find(LONGITUDE_ALIASES);

        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Ok(Self {
                latitude,
                longitude,
                lat_format: find(LAT_FORMAT_ALIASES),
                lon_format: find(LON_FORMAT_ALIASES),
            }),
            _ => {
                let mut missing = Vec::new();
                if latitude.is_none() {
                    missing.push(LATITUDE_ALIASES[0].to_string());
                }
                if longitude.is_none() {
                    missing.push(LONGITUDE_ALIASES[0].to_string());
                }
                Err(ConverterError::MissingColumns {
                    missing,
                    required: vec![
                        LATITUDE_ALIASES[0].to_string(),
                        LONGITUDE_ALIASES[0].to_string(),
                    ],
                })
            }
        }
    }
}

pub struct CsvReader;

impl CsvReader {
    pub fn new() -> Self {
        Self
    }

    /// Read and decode a CSV file from disk.
    pub fn read_path(&self, path: &Path) -> Result<Vec<BatchRow>> {
        let bytes = fs::read(path)?;
        self.read_bytes(&bytes)
    }

    /// Decode, repair and parse raw upload bytes into batch rows.
    pub fn read_bytes(&self, bytes: &[u8]) -> Result<Vec<BatchRow>> {
        let text = decode_bytes(bytes)?;
        let text = clean_text(&text);
        self.read_str(&text)
    }

    pub fn read_str(&self, text: &str) -> Result<Vec<BatchRow>> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let columns = ColumnMap::detect(&headers)?;
        debug!("Detected columns {:?} from header {:?}", columns, headers);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            if record.iter().all(|field| field.is_empty()) {
                continue;
            }

            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(rows.len() + 2);
            rows.push(build_row(&record, &columns, line));
        }

        info!("Read {} rows from CSV", rows.len());
        Ok(rows)
    }
}

impl Default for CsvReader {
    fn default() -> Self {
        Self::new()
    }
}

fn build_row(record: &StringRecord, columns: &ColumnMap, line: usize) -> BatchRow {
    let field = |idx: usize| record.get(idx).unwrap_or_default().to_string();

    let mut format_error = None;
    let mut format_at = |idx: Option<usize>| -> Option<CoordinateFormat> {
        let cell = idx.and_then(|i| record.get(i)).unwrap_or_default();
        if cell.is_empty() {
            return None;
        }
        match cell.parse::<CoordinateFormat>() {
            Ok(format) => Some(format),
            Err(_) => {
                if format_error.is_none() {
                    format_error = Some(cell.to_string());
                }
                None
            }
        }
    };

    let lat_format = format_at(columns.lat_format);
    let lon_format = format_at(columns.lon_format);

    BatchRow {
        line,
        latitude: field(columns.latitude),
        longitude: field(columns.longitude),
        lat_format,
        lon_format,
        format_error,
    }
}

/// Decode upload bytes: BOM-marked encodings first, then UTF-8, then Windows-1252.
pub fn decode_bytes(bytes: &[u8]) -> Result<Cow<'_, str>> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        if had_errors {
            return Err(ConverterError::Encoding(format!(
                "Input is marked as {} but contains invalid sequences",
                encoding.name()
            )));
        }
        debug!("Decoded upload as {} (BOM)", encoding.name());
        return Ok(text);
    }

    let (text, had_errors) = UTF_8.decode_without_bom_handling(bytes);
    if !had_errors {
        debug!("Decoded upload as UTF-8");
        return Ok(text);
    }

    // Windows-1252 maps every byte, which also covers Latin-1 exports
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    info!("Upload is not valid UTF-8; decoded as windows-1252");
    Ok(text)
}

/// Replace common mojibake produced by double-encoded degree signs and quotes.
pub fn clean_text(text: &str) -> Cow<'_, str> {
    if !CLEANING_REPLACEMENTS
        .iter()
        .any(|(wrong, _)| text.contains(wrong))
    {
        return Cow::Borrowed(text);
    }

    let mut cleaned = text.to_string();
    for (wrong, correct) in CLEANING_REPLACEMENTS {
        cleaned = cleaned.replace(wrong, correct);
    }
    Cow::Owned(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_standard_columns() -> Result<()> {
        let text = "latitude,longitude,lat_format,lon_format\n\
                    -1.2833,36.8167,dd,dd\n\
                    1°17'00\"S,36°49'00\"E,dms,dms\n";
        let rows = CsvReader::new().read_str(text)?;

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].latitude, "-1.2833");
        assert_eq!(rows[0].lat_format, Some(CoordinateFormat::Dd));
        assert_eq!(rows[1].longitude, "36°49'00\"E");
        assert_eq!(rows[1].lon_format, Some(CoordinateFormat::Dms));
        assert_eq!(rows[1].line, 3);
        Ok(())
    }

    #[test]
    fn test_detect_aliases_case_insensitive() -> Result<()> {
        let text = "Name, LAT , Lng\nNairobi,-1.2833,36.8167\n";
        let rows = CsvReader::new().read_str(text)?;

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].latitude, "-1.2833");
        assert_eq!(rows[0].longitude, "36.8167");
        assert_eq!(rows[0].lat_format, None);
        Ok(())
    }

    #[test]
    fn test_missing_columns_reported() {
        let err = CsvReader::new()
            .read_str("name,elevation\nNairobi,1795\n")
            .unwrap_err();

        match err {
            ConverterError::MissingColumns { missing, .. } => {
                assert_eq!(missing, vec!["latitude".to_string(), "longitude".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_format_cell_kept_on_row() -> Result<()> {
        let rows = CsvReader::new().read_str("lat,lon,lat_format,lon_format\n1,2,utm,dd\n")?;
        assert_eq!(rows[0].format_error.as_deref(), Some("utm"));
        assert_eq!(rows[0].lon_format, Some(CoordinateFormat::Dd));
        Ok(())
    }

    #[test]
    fn test_blank_rows_skipped() -> Result<()> {
        let rows = CsvReader::new().read_str("lat,lon\n1,2\n,\n3,4\n")?;
        assert_eq!(rows.len(), 2);
        Ok(())
    }

    #[test]
    fn test_decode_utf8_with_bom() -> Result<()> {
        let bytes = b"\xEF\xBB\xBFlatitude,longitude\n1,2\n";
        let rows = CsvReader::new().read_bytes(bytes)?;
        assert_eq!(rows.len(), 1);
        Ok(())
    }

    #[test]
    fn test_decode_windows_1252_degree_sign() -> Result<()> {
        // 0xB0 is the degree sign in windows-1252 and invalid on its own in UTF-8
        let bytes = b"latitude,longitude\n1\xB017.0'S,36\xB049.0'E\n";
        let text = decode_bytes(bytes)?;
        assert!(text.contains("1°17.0'S"));
        Ok(())
    }

    #[test]
    fn test_clean_mojibake() {
        assert_eq!(clean_text("1Â°17'00\"S"), "1°17'00\"S");
        assert_eq!(clean_text("1Ã‚Â°17'00\"S"), "1°17'00\"S");
        assert_eq!(clean_text("36â€™"), "36'");
        assert!(matches!(clean_text("plain"), Cow::Borrowed(_)));
    }
}
