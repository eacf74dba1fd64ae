use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::error::{ConverterError, Result};

/// Textual notation of a coordinate string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateFormat {
    /// Decimal degrees, e.g. `-1.2833`
    Dd,
    /// Degrees and decimal minutes, e.g. `1°17.0'S`
    Dm,
    /// Degrees, minutes and seconds, e.g. `1°17'00"S`
    Dms,
}

impl CoordinateFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoordinateFormat::Dd => "dd",
            CoordinateFormat::Dm => "dm",
            CoordinateFormat::Dms => "dms",
        }
    }

    /// Guess the notation from the number of numeric groups in the input.
    pub fn detect(input: &str) -> Result<Self> {
        let groups = input
            .split(|c: char| !(c.is_ascii_digit() || c == '.'))
            .filter(|group| group.chars().any(|c| c.is_ascii_digit()))
            .count();

        match groups {
            1 => Ok(CoordinateFormat::Dd),
            2 => Ok(CoordinateFormat::Dm),
            3 => Ok(CoordinateFormat::Dms),
            _ => Err(ConverterError::InvalidCoordinate(format!(
                "Could not detect notation of '{}'",
                input.trim()
            ))),
        }
    }
}

impl FromStr for CoordinateFormat {
    type Err = ConverterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dd" => Ok(CoordinateFormat::Dd),
            "dm" => Ok(CoordinateFormat::Dm),
            "dms" => Ok(CoordinateFormat::Dms),
            other => Err(ConverterError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for CoordinateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which half of a coordinate pair a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Lat,
    Lon,
}

impl Axis {
    pub fn name(&self) -> &'static str {
        match self {
            Axis::Lat => "latitude",
            Axis::Lon => "longitude",
        }
    }

    pub fn limit(&self) -> f64 {
        match self {
            Axis::Lat => 90.0,
            Axis::Lon => 180.0,
        }
    }

    /// Hemisphere letters for (positive, negative) values.
    pub fn hemispheres(&self) -> (char, char) {
        match self {
            Axis::Lat => ('N', 'S'),
            Axis::Lon => ('E', 'W'),
        }
    }

    pub fn hemisphere_for(&self, negative: bool) -> char {
        let (positive, negative_letter) = self.hemispheres();
        if negative {
            negative_letter
        } else {
            positive
        }
    }

    /// `true` for a southern or western letter; errors if the letter belongs to the other axis.
    pub fn hemisphere_sign(&self, letter: char) -> Result<bool> {
        let (positive, negative) = self.hemispheres();
        match letter {
            l if l == positive => Ok(false),
            l if l == negative => Ok(true),
            _ => Err(ConverterError::HemisphereMismatch {
                hemisphere: letter,
                axis: self.name(),
            }),
        }
    }

    pub fn validate(&self, value: f64) -> Result<f64> {
        let limit = self.limit();
        if !value.is_finite() || value < -limit || value > limit {
            return Err(ConverterError::OutOfRange {
                axis: self.name(),
                value,
                min: -limit,
                max: limit,
            });
        }
        Ok(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct GeographicPoint {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl GeographicPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a point and reject it if either component is out of range.
    pub fn checked(latitude: f64, longitude: f64) -> Result<Self> {
        let point = Self::new(
            Axis::Lat.validate(latitude)?,
            Axis::Lon.validate(longitude)?,
        );
        point.validate()?;
        Ok(point)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub easting: f64,
    pub northing: f64,
}

impl ProjectedPoint {
    pub fn new(easting: f64, northing: f64) -> Self {
        Self { easting, northing }
    }
}
