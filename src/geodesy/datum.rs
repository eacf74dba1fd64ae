use crate::geodesy::ellipsoid::{Ellipsoid, CLARKE_1880_RGS, WGS84};

/// Geodetic datum with a three-parameter geocentric translation to WGS 84.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Datum {
    pub name: &'static str,
    pub ellipsoid: Ellipsoid,
    /// dX, dY, dZ in metres, applied as `wgs84 = local + shift`
    pub to_wgs84: [f64; 3],
}

pub const WGS84_DATUM: Datum = Datum {
    name: "WGS 84",
    ellipsoid: WGS84,
    to_wgs84: [0.0, 0.0, 0.0],
};

/// Arc 1960 (East Africa)
pub const ARC_1960: Datum = Datum {
    name: "Arc 1960",
    ellipsoid: CLARKE_1880_RGS,
    to_wgs84: [-160.0, -6.0, -302.0],
};

const MAX_ITERATIONS: usize = 10;
const LATITUDE_TOLERANCE: f64 = 1e-14;

impl Datum {
    pub fn is_wgs84(&self) -> bool {
        self.ellipsoid == WGS84 && self.to_wgs84 == [0.0, 0.0, 0.0]
    }

    /// Geodetic (radians, metres) on this datum to WGS 84 geodetic.
    pub fn shift_to_wgs84(&self, phi: f64, lambda: f64) -> (f64, f64) {
        if self.is_wgs84() {
            return (phi, lambda);
        }
        let [x, y, z] = geodetic_to_geocentric(&self.ellipsoid, phi, lambda, 0.0);
        let [dx, dy, dz] = self.to_wgs84;
        let (phi, lambda, _) = geocentric_to_geodetic(&WGS84, [x + dx, y + dy, z + dz]);
        (phi, lambda)
    }

    /// WGS 84 geodetic (radians) to geodetic on this datum.
    pub fn shift_from_wgs84(&self, phi: f64, lambda: f64) -> (f64, f64) {
        if self.is_wgs84() {
            return (phi, lambda);
        }
        let [x, y, z] = geodetic_to_geocentric(&WGS84, phi, lambda, 0.0);
        let [dx, dy, dz] = self.to_wgs84;
        let (phi, lambda, _) = geocentric_to_geodetic(&self.ellipsoid, [x - dx, y - dy, z - dz]);
        (phi, lambda)
    }
}

pub fn geodetic_to_geocentric(ellipsoid: &Ellipsoid, phi: f64, lambda: f64, h: f64) -> [f64; 3] {
    let n = ellipsoid.prime_vertical_radius(phi);
    let e2 = ellipsoid.e2();
    [
        (n + h) * phi.cos() * lambda.cos(),
        (n + h) * phi.cos() * lambda.sin(),
        (n * (1.0 - e2) + h) * phi.sin(),
    ]
}

/// Iterative inverse; converges to sub-millimetre in a handful of steps for
/// points near the surface.
pub fn geocentric_to_geodetic(ellipsoid: &Ellipsoid, xyz: [f64; 3]) -> (f64, f64, f64) {
    let [x, y, z] = xyz;
    let e2 = ellipsoid.e2();
    let p = x.hypot(y);
    let lambda = y.atan2(x);

    let mut phi = z.atan2(p * (1.0 - e2));
    let mut h = 0.0;
    for _ in 0..MAX_ITERATIONS {
        let n = ellipsoid.prime_vertical_radius(phi);
        h = if phi.cos().abs() > 1e-12 {
            p / phi.cos() - n
        } else {
            z.abs() - n * (1.0 - e2)
        };
        let next = z.atan2(p * (1.0 - e2 * n / (n + h)));
        let converged = (next - phi).abs() < LATITUDE_TOLERANCE;
        phi = next;
        if converged {
            break;
        }
    }

    (phi, lambda, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geocentric_round_trip() {
        let phi = (-1.2833f64).to_radians();
        let lambda = 36.8167f64.to_radians();
        let xyz = geodetic_to_geocentric(&CLARKE_1880_RGS, phi, lambda, 1500.0);
        let (phi2, lambda2, h2) = geocentric_to_geodetic(&CLARKE_1880_RGS, xyz);

        assert!((phi2 - phi).abs() < 1e-12);
        assert!((lambda2 - lambda).abs() < 1e-12);
        assert!((h2 - 1500.0).abs() < 1e-4);
    }

    #[test]
    fn test_datum_shift_round_trip() {
        let phi = (-1.2833f64).to_radians();
        let lambda = 36.8167f64.to_radians();
        let (local_phi, local_lambda) = ARC_1960.shift_from_wgs84(phi, lambda);
        let (phi2, lambda2) = ARC_1960.shift_to_wgs84(local_phi, local_lambda);

        // Height is dropped on each hop, which costs a few centimetres
        assert!((phi2 - phi).abs() < 2e-8);
        assert!((lambda2 - lambda).abs() < 2e-8);
    }

    #[test]
    fn test_arc1960_shift_is_a_few_hundred_metres() {
        let phi = (-1.2833f64).to_radians();
        let lambda = 36.8167f64.to_radians();
        let (local_phi, local_lambda) = ARC_1960.shift_from_wgs84(phi, lambda);

        let dphi_m = (local_phi - phi).abs() * 6_378_000.0;
        let dlambda_m = (local_lambda - lambda).abs() * 6_378_000.0;
        assert!(dphi_m > 10.0 && dphi_m < 500.0);
        assert!(dlambda_m > 10.0 && dlambda_m < 500.0);
    }

    #[test]
    fn test_wgs84_is_identity() {
        assert_eq!(WGS84_DATUM.shift_to_wgs84(0.5, 0.25), (0.5, 0.25));
    }
}
