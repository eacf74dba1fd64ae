use serde::{Deserialize, Serialize};

use crate::models::CoordinateFormat;

pub const STATUS_SUCCESS: &str = "success";

/// One input row of a batch upload after column detection and cleaning.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRow {
    pub line: usize,
    pub latitude: String,
    pub longitude: String,
    pub lat_format: Option<CoordinateFormat>,
    pub lon_format: Option<CoordinateFormat>,
    /// Raw format cell that failed to parse; reported on the row instead of failing the batch.
    pub format_error: Option<String>,
}

/// One output row of a batch conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub input_latitude: String,
    pub input_longitude: String,
    pub easting: Option<f64>,
    pub northing: Option<f64>,
    pub status: String,
}

impl BatchRecord {
    pub fn success(row: &BatchRow, easting: f64, northing: f64) -> Self {
        Self {
            input_latitude: row.latitude.clone(),
            input_longitude: row.longitude.clone(),
            easting: Some(easting),
            northing: Some(northing),
            status: STATUS_SUCCESS.to_string(),
        }
    }

    pub fn failure(row: &BatchRow, message: impl std::fmt::Display) -> Self {
        Self {
            input_latitude: row.latitude.clone(),
            input_longitude: row.longitude.clone(),
            easting: None,
            northing: None,
            status: format!("error: {}", message),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub filename: String,
    pub record_count: usize,
    pub success_count: usize,
}

impl BatchSummary {
    pub fn from_records(filename: &str, records: &[BatchRecord]) -> Self {
        Self {
            filename: filename.to_string(),
            record_count: records.len(),
            success_count: records.iter().filter(|r| r.is_success()).count(),
        }
    }

    pub fn failure_count(&self) -> usize {
        self.record_count - self.success_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> BatchRow {
        BatchRow {
            line: 2,
            latitude: "-1.2833".to_string(),
            longitude: "36.8167".to_string(),
            lat_format: Some(CoordinateFormat::Dd),
            lon_format: Some(CoordinateFormat::Dd),
            format_error: None,
        }
    }

    #[test]
    fn test_summary_counts() {
        let records = vec![
            BatchRecord::success(&row(), 257_000.0, 9_858_000.0),
            BatchRecord::failure(&row(), "bad latitude"),
        ];
        let summary = BatchSummary::from_records("points.csv", &records);

        assert_eq!(summary.record_count, 2);
        assert_eq!(summary.success_count, 1);
        assert_eq!(summary.failure_count(), 1);
        assert_eq!(records[1].status, "error: bad latitude");
    }
}
