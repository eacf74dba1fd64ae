use std::fmt;

use crate::error::{ConverterError, Result};
use crate::geodesy::datum::{Datum, ARC_1960, WGS84_DATUM};
use crate::utils::constants::EPSG_WGS84;

/// A projected UTM coordinate reference system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtmCrs {
    pub epsg: u32,
    pub datum: Datum,
    pub zone: u8,
    pub south: bool,
}

impl UtmCrs {
    pub fn hemisphere(&self) -> char {
        if self.south {
            'S'
        } else {
            'N'
        }
    }

    pub fn central_meridian(&self) -> f64 {
        f64::from(self.zone) * 6.0 - 183.0
    }
}

impl fmt::Display for UtmCrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / UTM zone {}{}",
            self.datum.name,
            self.zone,
            self.hemisphere()
        )
    }
}

/// Coordinate reference systems known to the converter, keyed by EPSG code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Crs {
    /// WGS 84 geographic latitude/longitude
    Wgs84,
    Utm(UtmCrs),
}

impl Crs {
    pub fn from_epsg(code: u32) -> Result<Self> {
        let utm = |datum: Datum, zone: u32, south: bool| {
            Crs::Utm(UtmCrs {
                epsg: code,
                datum,
                zone: zone as u8,
                south,
            })
        };

        match code {
            EPSG_WGS84 => Ok(Crs::Wgs84),
            // Arc 1960 / UTM zones 35S-37S
            21035..=21037 => Ok(utm(ARC_1960, code - 21000, true)),
            32601..=32660 => Ok(utm(WGS84_DATUM, code - 32600, false)),
            32701..=32760 => Ok(utm(WGS84_DATUM, code - 32700, true)),
            _ => Err(ConverterError::UnsupportedCrs(code)),
        }
    }

    pub fn epsg(&self) -> u32 {
        match self {
            Crs::Wgs84 => EPSG_WGS84,
            Crs::Utm(utm) => utm.epsg,
        }
    }

    /// The UTM definition, or an error for geographic systems.
    pub fn projected(&self) -> Result<UtmCrs> {
        match self {
            Crs::Utm(utm) => Ok(*utm),
            Crs::Wgs84 => Err(ConverterError::Transformation(format!(
                "EPSG:{} is geographic; a projected UTM system is required",
                EPSG_WGS84
            ))),
        }
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Crs::Wgs84 => f.write_str("WGS 84"),
            Crs::Utm(utm) => write!(f, "{}", utm),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc1960_zone_37s() {
        let crs = Crs::from_epsg(21037).unwrap();
        let utm = crs.projected().unwrap();
        assert_eq!(utm.zone, 37);
        assert!(utm.south);
        assert_eq!(utm.central_meridian(), 39.0);
        assert_eq!(crs.to_string(), "Arc 1960 / UTM zone 37S");
    }

    #[test]
    fn test_wgs84_utm_codes() {
        let north = Crs::from_epsg(32633).unwrap().projected().unwrap();
        assert_eq!((north.zone, north.south), (33, false));

        let south = Crs::from_epsg(32760).unwrap().projected().unwrap();
        assert_eq!((south.zone, south.south), (60, true));
        assert_eq!(south.central_meridian(), 177.0);
    }

    #[test]
    fn test_unknown_codes_rejected() {
        assert!(matches!(
            Crs::from_epsg(3857),
            Err(ConverterError::UnsupportedCrs(3857))
        ));
        assert!(Crs::from_epsg(32600).is_err());
        assert!(Crs::from_epsg(21038).is_err());
    }

    #[test]
    fn test_geographic_is_not_projected() {
        let crs = Crs::from_epsg(4326).unwrap();
        assert_eq!(crs.epsg(), 4326);
        assert!(crs.projected().is_err());
    }
}
