//! Ellipsoidal transverse Mercator projection using the Krüger series
//! truncated at fourth order in the third flattening.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{ConverterError, Result};
use crate::geodesy::ellipsoid::Ellipsoid;

/// UTM central scale factor
pub const UTM_K0: f64 = 0.9996;
pub const UTM_FALSE_EASTING: f64 = 500_000.0;
pub const UTM_FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct TransverseMercator {
    central_meridian: f64,
    k0: f64,
    false_easting: f64,
    false_northing: f64,
    eccentricity: f64,
    /// Rectifying radius
    radius: f64,
    alpha: [f64; 4],
    beta: [f64; 4],
    delta: [f64; 4],
}

impl TransverseMercator {
    /// `central_meridian` is in degrees.
    pub fn new(
        ellipsoid: &Ellipsoid,
        central_meridian: f64,
        k0: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        let n = ellipsoid.third_flattening();
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;

        Self {
            central_meridian: central_meridian.to_radians(),
            k0,
            false_easting,
            false_northing,
            eccentricity: ellipsoid.eccentricity(),
            radius: ellipsoid.a / (1.0 + n) * (1.0 + n2 / 4.0 + n4 / 64.0),
            alpha: [
                n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0 + 41.0 * n4 / 180.0,
                13.0 * n2 / 48.0 - 3.0 * n3 / 5.0 + 557.0 * n4 / 1440.0,
                61.0 * n3 / 240.0 - 103.0 * n4 / 140.0,
                49561.0 * n4 / 161280.0,
            ],
            beta: [
                n / 2.0 - 2.0 * n2 / 3.0 + 37.0 * n3 / 96.0 - n4 / 360.0,
                n2 / 48.0 + n3 / 15.0 - 437.0 * n4 / 1440.0,
                17.0 * n3 / 480.0 - 37.0 * n4 / 840.0,
                4397.0 * n4 / 161280.0,
            ],
            delta: [
                2.0 * n - 2.0 * n2 / 3.0 - 2.0 * n3 + 116.0 * n4 / 45.0,
                7.0 * n2 / 3.0 - 8.0 * n3 / 5.0 - 227.0 * n4 / 45.0,
                56.0 * n3 / 15.0 - 136.0 * n4 / 35.0,
                4279.0 * n4 / 630.0,
            ],
        }
    }

    /// UTM zone projection: zone 1 is centred on 177°W.
    pub fn utm(ellipsoid: &Ellipsoid, zone: u8, south: bool) -> Self {
        let central_meridian = f64::from(zone) * 6.0 - 183.0;
        let false_northing = if south {
            UTM_FALSE_NORTHING_SOUTH
        } else {
            0.0
        };
        Self::new(
            ellipsoid,
            central_meridian,
            UTM_K0,
            UTM_FALSE_EASTING,
            false_northing,
        )
    }

    pub fn central_meridian_degrees(&self) -> f64 {
        self.central_meridian.to_degrees()
    }

    /// Project geodetic latitude/longitude (radians) to easting/northing (metres).
    pub fn forward(&self, phi: f64, lambda: f64) -> Result<(f64, f64)> {
        let dl = normalize_angle(lambda - self.central_meridian);
        if dl.abs() >= FRAC_PI_2 {
            return Err(ConverterError::Transformation(format!(
                "Longitude {:.6} is more than 90° from the central meridian {:.1}",
                lambda.to_degrees(),
                self.central_meridian_degrees()
            )));
        }

        let (xi_prime, eta_prime) = if (phi.abs() - FRAC_PI_2).abs() < 1e-15 {
            (phi.signum() * FRAC_PI_2, 0.0)
        } else {
            let sin_phi = phi.sin();
            let e = self.eccentricity;
            let t = (sin_phi.atanh() - e * (e * sin_phi).atanh()).sinh();
            (
                t.atan2(dl.cos()),
                (dl.sin() / (1.0 + t * t).sqrt()).atanh(),
            )
        };

        let mut xi = xi_prime;
        let mut eta = eta_prime;
        for (j, alpha) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j as f64 + 1.0);
            xi += alpha * (k * xi_prime).sin() * (k * eta_prime).cosh();
            eta += alpha * (k * xi_prime).cos() * (k * eta_prime).sinh();
        }

        let scale = self.k0 * self.radius;
        Ok((
            self.false_easting + scale * eta,
            self.false_northing + scale * xi,
        ))
    }

    /// Unproject easting/northing (metres) to geodetic latitude/longitude (radians).
    pub fn inverse(&self, easting: f64, northing: f64) -> Result<(f64, f64)> {
        if !easting.is_finite() || !northing.is_finite() {
            return Err(ConverterError::Transformation(
                "Projected coordinates must be finite".to_string(),
            ));
        }

        let scale = self.k0 * self.radius;
        let xi = (northing - self.false_northing) / scale;
        let eta = (easting - self.false_easting) / scale;

        let mut xi_prime = xi;
        let mut eta_prime = eta;
        for (j, beta) in self.beta.iter().enumerate() {
            let k = 2.0 * (j as f64 + 1.0);
            xi_prime -= beta * (k * xi).sin() * (k * eta).cosh();
            eta_prime -= beta * (k * xi).cos() * (k * eta).sinh();
        }

        let chi = (xi_prime.sin() / eta_prime.cosh()).clamp(-1.0, 1.0).asin();
        let mut phi = chi;
        for (j, delta) in self.delta.iter().enumerate() {
            let k = 2.0 * (j as f64 + 1.0);
            phi += delta * (k * chi).sin();
        }

        let lambda = self.central_meridian + eta_prime.sinh().atan2(xi_prime.cos());
        Ok((phi, normalize_angle(lambda)))
    }
}

/// Wrap an angle into (-π, π].
fn normalize_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped == -PI {
        PI
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesy::ellipsoid::WGS84;

    #[test]
    fn test_origin_of_zone_maps_to_false_origin() {
        let tm = TransverseMercator::utm(&WGS84, 37, false);
        let (e, n) = tm.forward(0.0, 39f64.to_radians()).unwrap();
        assert!((e - 500_000.0).abs() < 1e-6);
        assert!(n.abs() < 1e-6);
    }

    #[test]
    fn test_wgs84_utm_37s_nairobi() {
        let tm = TransverseMercator::utm(&WGS84, 37, true);
        let (e, n) = tm
            .forward((-1.2833f64).to_radians(), 36.8167f64.to_radians())
            .unwrap();
        assert!((e - 257_054.76).abs() < 1.0, "easting {}", e);
        assert!((n - 9_858_052.85).abs() < 1.0, "northing {}", n);
    }

    #[test]
    fn test_forward_inverse_round_trip() {
        let tm = TransverseMercator::utm(&WGS84, 37, true);
        for &(lat, lon) in &[(-1.2833, 36.8167), (-4.05, 39.6667), (-11.5, 41.9), (3.2, 35.1)] {
            let (e, n) = tm.forward(f64::to_radians(lat), f64::to_radians(lon)).unwrap();
            let (phi, lambda) = tm.inverse(e, n).unwrap();
            assert!((phi.to_degrees() - lat).abs() < 1e-9);
            assert!((lambda.to_degrees() - lon).abs() < 1e-9);
        }
    }

    #[test]
    fn test_symmetry_about_central_meridian() {
        let tm = TransverseMercator::utm(&WGS84, 37, false);
        let (e_east, n_east) = tm.forward(0.2, (39f64 + 2.0).to_radians()).unwrap();
        let (e_west, n_west) = tm.forward(0.2, (39f64 - 2.0).to_radians()).unwrap();
        assert!((e_east - 500_000.0 + (e_west - 500_000.0)).abs() < 1e-6);
        assert!((n_east - n_west).abs() < 1e-6);
    }

    #[test]
    fn test_pole_projects_onto_central_meridian() {
        let tm = TransverseMercator::utm(&WGS84, 37, false);
        let (e, _) = tm.forward(FRAC_PI_2, 39f64.to_radians()).unwrap();
        assert!((e - 500_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_far_longitude_rejected() {
        let tm = TransverseMercator::utm(&WGS84, 37, false);
        assert!(tm.forward(0.0, (-150f64).to_radians()).is_err());
    }

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(3.0 * PI / 2.0) + FRAC_PI_2).abs() < 1e-12);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-12);
    }
}
