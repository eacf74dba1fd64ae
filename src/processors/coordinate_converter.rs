use std::borrow::Cow;
use tracing::info;

use crate::error::Result;
use crate::geodesy::Transformer;
use crate::models::{
    Axis, ConversionRequest, CoordinateFormat, GeographicPoint, PointResponse, ProjectedPoint,
    ReverseConversionRequest, ReversePointResponse,
};
use crate::utils::constants::{GEOGRAPHIC_DECIMALS, PROJECTED_DECIMALS};
use crate::utils::coordinates::{decimal_to_dms, parse_coordinate, round_to};
use validator::Validate;

/// Parses user input and runs single-point conversions against a default target system.
#[derive(Debug, Clone)]
pub struct CoordinateConverter {
    transformer: Transformer,
}

impl CoordinateConverter {
    pub fn new(target_epsg: u32) -> Result<Self> {
        Ok(Self {
            transformer: Transformer::from_epsg(target_epsg)?,
        })
    }

    pub fn default_epsg(&self) -> u32 {
        self.transformer.epsg()
    }

    /// The default transformer, or a one-off one when a request names another system.
    pub fn transformer_for(&self, epsg: Option<u32>) -> Result<Cow<'_, Transformer>> {
        match epsg {
            Some(code) if code != self.transformer.epsg() => {
                Ok(Cow::Owned(Transformer::from_epsg(code)?))
            }
            _ => Ok(Cow::Borrowed(&self.transformer)),
        }
    }

    /// Parse a latitude/longitude pair from their textual notations.
    pub fn parse_point(
        &self,
        latitude: &str,
        lat_format: CoordinateFormat,
        longitude: &str,
        lon_format: CoordinateFormat,
    ) -> Result<GeographicPoint> {
        let lat = parse_coordinate(latitude, lat_format, Axis::Lat)?;
        let lon = parse_coordinate(longitude, lon_format, Axis::Lon)?;
        GeographicPoint::checked(lat, lon)
    }

    /// Project a parsed point, rounded to millimetres.
    pub fn project(&self, point: GeographicPoint, epsg: Option<u32>) -> Result<ProjectedPoint> {
        let transformer = self.transformer_for(epsg)?;
        project_with(&transformer, point)
    }

    /// WGS 84 (DD/DM/DMS strings) to projected easting/northing.
    pub fn convert_point(&self, request: &ConversionRequest) -> Result<PointResponse> {
        let point = self.parse_point(
            &request.latitude,
            request.lat_format,
            &request.longitude,
            request.lon_format,
        )?;
        let transformer = self.transformer_for(request.target_epsg)?;
        let projected = project_with(&transformer, point)?;

        info!(
            "Transformed {}: ({}, {}) -> ({:.3}, {:.3})",
            transformer.forward_label(),
            point.latitude,
            point.longitude,
            projected.easting,
            projected.northing
        );

        Ok(PointResponse {
            easting: projected.easting,
            northing: projected.northing,
            latitude: round_to(point.latitude, GEOGRAPHIC_DECIMALS),
            longitude: round_to(point.longitude, GEOGRAPHIC_DECIMALS),
            input_lat: request.latitude.clone(),
            input_lon: request.longitude.clone(),
            epsg: transformer.epsg(),
        })
    }

    /// Projected easting/northing back to WGS 84 decimal degrees and DMS.
    pub fn convert_reverse(&self, request: &ReverseConversionRequest) -> Result<ReversePointResponse> {
        request.validate()?;
        let transformer = self.transformer_for(request.source_epsg)?;
        let point = transformer.inverse(ProjectedPoint::new(request.easting, request.northing))?;

        info!(
            "Transformed {}: ({}, {}) -> ({:.6}, {:.6})",
            transformer.inverse_label(),
            request.easting,
            request.northing,
            point.latitude,
            point.longitude
        );

        Ok(ReversePointResponse {
            latitude: round_to(point.latitude, GEOGRAPHIC_DECIMALS),
            longitude: round_to(point.longitude, GEOGRAPHIC_DECIMALS),
            latitude_dms: decimal_to_dms(point.latitude, Axis::Lat)?,
            longitude_dms: decimal_to_dms(point.longitude, Axis::Lon)?,
            input_easting: request.easting,
            input_northing: request.northing,
            epsg: transformer.epsg(),
        })
    }
}

/// Project with an already-resolved transformer, rounded to millimetres.
pub fn project_with(transformer: &Transformer, point: GeographicPoint) -> Result<ProjectedPoint> {
    let projected = transformer.forward(point)?;
    Ok(ProjectedPoint::new(
        round_to(projected.easting, PROJECTED_DECIMALS),
        round_to(projected.northing, PROJECTED_DECIMALS),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constants::EPSG_ARC1960_UTM_37S;

    fn converter() -> CoordinateConverter {
        CoordinateConverter::new(EPSG_ARC1960_UTM_37S).unwrap()
    }

    fn request(lat: &str, lon: &str, format: CoordinateFormat) -> ConversionRequest {
        ConversionRequest {
            latitude: lat.to_string(),
            longitude: lon.to_string(),
            lat_format: format,
            lon_format: format,
            target_epsg: None,
        }
    }

    #[test]
    fn test_notations_agree() {
        let converter = converter();
        let dd = converter
            .convert_point(&request("-1.283333", "36.816667", CoordinateFormat::Dd))
            .unwrap();
        let dm = converter
            .convert_point(&request("1°17.0'S", "36°49.0'E", CoordinateFormat::Dm))
            .unwrap();
        let dms = converter
            .convert_point(&request("1°17'00\"S", "36°49'00\"E", CoordinateFormat::Dms))
            .unwrap();

        assert!((dd.easting - dm.easting).abs() < 0.05);
        assert!((dm.easting - dms.easting).abs() < 1e-6);
        assert!((dm.northing - dms.northing).abs() < 1e-6);
        assert_eq!(dms.epsg, 21037);
        assert_eq!(dms.input_lat, "1°17'00\"S");
    }

    #[test]
    fn test_point_response_carries_parsed_position() {
        // North of the equator, so the 37S northing exceeds the reverse input bound
        let response = converter()
            .convert_point(&request("0.3167", "32.5833", CoordinateFormat::Dd))
            .unwrap();

        assert!(response.northing > 10_000_000.0);
        assert_eq!(response.latitude, 0.3167);
        assert_eq!(response.longitude, 32.5833);

        let dms = converter()
            .convert_point(&request("1°17'00\"S", "36°49'00\"E", CoordinateFormat::Dms))
            .unwrap();
        assert_eq!(dms.latitude, -1.283333);
        assert_eq!(dms.longitude, 36.816667);
    }

    #[test]
    fn test_point_rounded_to_millimetres() {
        let response = converter()
            .convert_point(&request("-1.2833", "36.8167", CoordinateFormat::Dd))
            .unwrap();
        assert_eq!(round_to(response.easting, 3), response.easting);
        assert_eq!(round_to(response.northing, 3), response.northing);
    }

    #[test]
    fn test_target_override() {
        let mut req = request("-1.2833", "36.8167", CoordinateFormat::Dd);
        req.target_epsg = Some(32737);
        let response = converter().convert_point(&req).unwrap();

        assert_eq!(response.epsg, 32737);
        assert!((response.easting - 257_054.76).abs() < 1.0);
    }

    #[test]
    fn test_unknown_target_rejected() {
        let mut req = request("-1.2833", "36.8167", CoordinateFormat::Dd);
        req.target_epsg = Some(3857);
        assert!(converter().convert_point(&req).is_err());
    }

    #[test]
    fn test_reverse_conversion() {
        let converter = converter();
        let forward = converter
            .convert_point(&request("1°17'00\"S", "36°49'00\"E", CoordinateFormat::Dms))
            .unwrap();
        let reverse = converter
            .convert_reverse(&ReverseConversionRequest {
                easting: forward.easting,
                northing: forward.northing,
                source_epsg: None,
            })
            .unwrap();

        assert!((reverse.latitude - -1.283333).abs() < 1e-5);
        assert!((reverse.longitude - 36.816667).abs() < 1e-5);
        assert_eq!(reverse.latitude_dms, "1°17'00.000\"S");
        assert_eq!(reverse.longitude_dms, "36°49'00.000\"E");
    }

    #[test]
    fn test_reverse_rejects_out_of_range_input() {
        let result = converter().convert_reverse(&ReverseConversionRequest {
            easting: 1_500_000.0,
            northing: 9_858_000.0,
            source_epsg: None,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_input_rejected() {
        let converter = converter();
        assert!(converter
            .convert_point(&request("95", "36.8", CoordinateFormat::Dd))
            .is_err());
        assert!(converter
            .convert_point(&request("1°17'00\"E", "36°49'00\"E", CoordinateFormat::Dms))
            .is_err());
    }
}
