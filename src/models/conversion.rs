use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::CoordinateFormat;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub latitude: String,
    pub longitude: String,
    pub lat_format: CoordinateFormat,
    pub lon_format: CoordinateFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_epsg: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReverseConversionRequest {
    #[validate(range(min = 0.0, max = 1_000_000.0))]
    pub easting: f64,

    #[validate(range(min = 0.0, max = 10_000_000.0))]
    pub northing: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_epsg: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointResponse {
    pub easting: f64,
    pub northing: f64,
    /// Parsed WGS 84 position of the input, for placing map markers.
    pub latitude: f64,
    pub longitude: f64,
    pub input_lat: String,
    pub input_lon: String,
    pub epsg: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReversePointResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_dms: String,
    pub longitude_dms: String,
    pub input_easting: f64,
    pub input_northing: f64,
    pub epsg: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserialization() {
        let request: ConversionRequest = serde_json::from_str(
            r#"{"latitude":"-1.2833","longitude":"36.8167","lat_format":"dd","lon_format":"dd"}"#,
        )
        .unwrap();

        assert_eq!(request.lat_format, CoordinateFormat::Dd);
        assert_eq!(request.target_epsg, None);
    }

    #[test]
    fn test_request_rejects_unknown_format() {
        let result = serde_json::from_str::<ConversionRequest>(
            r#"{"latitude":"1","longitude":"2","lat_format":"utm","lon_format":"dd"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_reverse_request_validation() {
        let ok = ReverseConversionRequest {
            easting: 257_000.0,
            northing: 9_858_000.0,
            source_epsg: None,
        };
        assert!(ok.validate().is_ok());

        let bad = ReverseConversionRequest {
            easting: -5.0,
            northing: 10_500_000.0,
            source_epsg: None,
        };
        assert!(bad.validate().is_err());
    }
}
