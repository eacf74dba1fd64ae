use tracing::{debug, warn};

use crate::error::{ConverterError, Result};
use crate::geodesy::crs::{Crs, UtmCrs};
use crate::geodesy::transverse_mercator::TransverseMercator;
use crate::models::{GeographicPoint, ProjectedPoint};
use crate::utils::constants::{
    EPSG_WGS84, MAX_EASTING, MAX_NORTHING, MIN_EASTING, MIN_NORTHING, ZONE_ADVISORY_DEGREES,
};

/// Converts between WGS 84 geographic coordinates and one UTM system.
#[derive(Debug, Clone)]
pub struct Transformer {
    target: UtmCrs,
    projection: TransverseMercator,
}

impl Transformer {
    pub fn new(target: Crs) -> Result<Self> {
        let target = target.projected()?;
        let projection =
            TransverseMercator::utm(&target.datum.ellipsoid, target.zone, target.south);
        Ok(Self { target, projection })
    }

    pub fn from_epsg(code: u32) -> Result<Self> {
        Self::new(Crs::from_epsg(code)?)
    }

    pub fn target(&self) -> &UtmCrs {
        &self.target
    }

    pub fn epsg(&self) -> u32 {
        self.target.epsg
    }

    /// e.g. `4326_to_21037`
    pub fn forward_label(&self) -> String {
        format!("{}_to_{}", EPSG_WGS84, self.target.epsg)
    }

    /// e.g. `21037_to_4326`
    pub fn inverse_label(&self) -> String {
        format!("{}_to_{}", self.target.epsg, EPSG_WGS84)
    }

    /// WGS 84 latitude/longitude to easting/northing in the target system.
    pub fn forward(&self, point: GeographicPoint) -> Result<ProjectedPoint> {
        let point = GeographicPoint::checked(point.latitude, point.longitude)?;

        let offset = (point.longitude - self.target.central_meridian()).abs();
        if offset > ZONE_ADVISORY_DEGREES {
            warn!(
                "Longitude {} may be outside optimal range for {} ({:.1}° from central meridian)",
                point.longitude, self.target, offset
            );
        }

        let (phi, lambda) = self
            .target
            .datum
            .shift_from_wgs84(point.latitude.to_radians(), point.longitude.to_radians());
        let (easting, northing) = self.projection.forward(phi, lambda)?;

        if !easting.is_finite() || !northing.is_finite() {
            return Err(ConverterError::Transformation(format!(
                "No finite projection for ({}, {}) in {}",
                point.latitude, point.longitude, self.target
            )));
        }

        debug!(
            "Projected ({}, {}) -> ({:.3}, {:.3}) in EPSG:{}",
            point.latitude, point.longitude, easting, northing, self.target.epsg
        );
        Ok(ProjectedPoint::new(easting, northing))
    }

    /// Easting/northing in the target system back to WGS 84 latitude/longitude.
    pub fn inverse(&self, point: ProjectedPoint) -> Result<GeographicPoint> {
        if !(MIN_EASTING..=MAX_EASTING).contains(&point.easting) {
            return Err(ConverterError::OutOfRange {
                axis: "easting",
                value: point.easting,
                min: MIN_EASTING,
                max: MAX_EASTING,
            });
        }
        if !(MIN_NORTHING..=MAX_NORTHING).contains(&point.northing) {
            return Err(ConverterError::OutOfRange {
                axis: "northing",
                value: point.northing,
                min: MIN_NORTHING,
                max: MAX_NORTHING,
            });
        }

        let (phi, lambda) = self.projection.inverse(point.easting, point.northing)?;
        let (phi, lambda) = self.target.datum.shift_to_wgs84(phi, lambda);
        let result = GeographicPoint::checked(phi.to_degrees(), lambda.to_degrees())?;

        debug!(
            "Unprojected ({}, {}) in EPSG:{} -> ({:.6}, {:.6})",
            point.easting, point.northing, self.target.epsg, result.latitude, result.longitude
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constants::EPSG_ARC1960_UTM_37S;

    fn arc1960() -> Transformer {
        Transformer::from_epsg(EPSG_ARC1960_UTM_37S).unwrap()
    }

    #[test]
    fn test_nairobi_to_arc1960_utm_37s() {
        let projected = arc1960()
            .forward(GeographicPoint::new(-1.2833, 36.8167))
            .unwrap();

        assert!((projected.easting - 256_959.1).abs() < 1.0, "{:?}", projected);
        assert!((projected.northing - 9_858_355.2).abs() < 1.0, "{:?}", projected);
    }

    #[test]
    fn test_mombasa_east_of_central_meridian() {
        let projected = arc1960()
            .forward(GeographicPoint::new(-4.05, 39.6667))
            .unwrap();

        assert!((projected.easting - 573_908.7).abs() < 1.0);
        assert!((projected.northing - 9_552_617.7).abs() < 1.0);
    }

    #[test]
    fn test_forward_inverse_round_trip() {
        let transformer = arc1960();
        for &(lat, lon) in &[(-1.2833, 36.8167), (-4.05, 39.6667), (-0.5, 41.0)] {
            let projected = transformer.forward(GeographicPoint::new(lat, lon)).unwrap();
            let back = transformer.inverse(projected).unwrap();
            assert!((back.latitude - lat).abs() < 1e-6);
            assert!((back.longitude - lon).abs() < 1e-6);
        }
    }

    #[test]
    fn test_wgs84_utm_round_trip_is_exact() {
        let transformer = Transformer::from_epsg(32737).unwrap();
        let projected = transformer
            .forward(GeographicPoint::new(-1.2833, 36.8167))
            .unwrap();
        let back = transformer.inverse(projected).unwrap();

        assert!((back.latitude - -1.2833).abs() < 1e-9);
        assert!((back.longitude - 36.8167).abs() < 1e-9);
    }

    #[test]
    fn test_inverse_rejects_out_of_range() {
        let transformer = arc1960();
        assert!(transformer
            .inverse(ProjectedPoint::new(-10.0, 9_858_000.0))
            .is_err());
        assert!(transformer
            .inverse(ProjectedPoint::new(257_000.0, 10_000_001.0))
            .is_err());
    }

    #[test]
    fn test_forward_rejects_invalid_latitude() {
        assert!(arc1960()
            .forward(GeographicPoint::new(95.0, 36.8))
            .is_err());
    }

    #[test]
    fn test_geographic_target_rejected() {
        assert!(Transformer::from_epsg(4326).is_err());
    }

    #[test]
    fn test_labels() {
        let transformer = arc1960();
        assert_eq!(transformer.forward_label(), "4326_to_21037");
        assert_eq!(transformer.inverse_label(), "21037_to_4326");
    }
}
