/// Reference ellipsoid defined by semi-major axis and inverse flattening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    pub name: &'static str,
    /// Semi-major axis in metres
    pub a: f64,
    /// Inverse flattening
    pub rf: f64,
}

pub const WGS84: Ellipsoid = Ellipsoid {
    name: "WGS 84",
    a: 6_378_137.0,
    rf: 298.257223563,
};

/// Clarke 1880 (RGS), used by the Arc 1960 datum
pub const CLARKE_1880_RGS: Ellipsoid = Ellipsoid {
    name: "Clarke 1880 (RGS)",
    a: 6_378_249.145,
    rf: 293.465,
};

impl Ellipsoid {
    pub fn flattening(&self) -> f64 {
        1.0 / self.rf
    }

    /// First eccentricity squared
    pub fn e2(&self) -> f64 {
        let f = self.flattening();
        f * (2.0 - f)
    }

    pub fn eccentricity(&self) -> f64 {
        self.e2().sqrt()
    }

    /// Third flattening n = f / (2 - f)
    pub fn third_flattening(&self) -> f64 {
        let f = self.flattening();
        f / (2.0 - f)
    }

    /// Prime vertical radius of curvature at geodetic latitude `phi` (radians)
    pub fn prime_vertical_radius(&self, phi: f64) -> f64 {
        self.a / (1.0 - self.e2() * phi.sin().powi(2)).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wgs84_derived_values() {
        assert!((WGS84.e2() - 0.006_694_379_990_14).abs() < 1e-12);
        assert!((WGS84.third_flattening() - 0.001_679_220_386_38).abs() < 1e-12);
    }

    #[test]
    fn test_prime_vertical_radius_at_equator() {
        assert!((CLARKE_1880_RGS.prime_vertical_radius(0.0) - CLARKE_1880_RGS.a).abs() < 1e-6);
    }
}
