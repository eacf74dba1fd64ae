use crate::error::{ConverterError, Result};
use crate::models::{Axis, CoordinateFormat};
use crate::utils::constants::{DEFAULT_DMS_PRECISION, MAX_DMS_PRECISION};

/// Characters accepted between degree, minute and second components.
const COMPONENT_SEPARATORS: &[char] = &['°', '\'', '′', '"', '″', ':'];

/// Parse a coordinate string in the given notation into signed decimal degrees
///
/// # Examples
/// ```
/// use coordinate_converter::models::{Axis, CoordinateFormat};
/// use coordinate_converter::utils::parse_coordinate;
///
/// let lat = parse_coordinate("1°17'00\"S", CoordinateFormat::Dms, Axis::Lat).unwrap();
/// assert!((lat - -1.283333).abs() < 0.000001);
/// ```
pub fn parse_coordinate(input: &str, format: CoordinateFormat, axis: Axis) -> Result<f64> {
    let normalized = input.trim().replace('d', "°").to_uppercase();
    if normalized.is_empty() {
        return Err(ConverterError::InvalidCoordinate(format!(
            "Empty {} value",
            axis.name()
        )));
    }

    let (body, hemisphere) = split_hemisphere(&normalized)?;
    let (body, minus) = match body.strip_prefix('-') {
        Some(rest) => (rest.trim_start(), true),
        None => (body.strip_prefix('+').unwrap_or(body).trim_start(), false),
    };

    let components: Vec<&str> = body
        .split(|c: char| c.is_whitespace() || COMPONENT_SEPARATORS.contains(&c))
        .filter(|part| !part.is_empty())
        .collect();

    let expected = match format {
        CoordinateFormat::Dd => 1,
        CoordinateFormat::Dm => 2,
        CoordinateFormat::Dms => 3,
    };
    if components.len() != expected {
        return Err(ConverterError::InvalidCoordinate(format!(
            "Could not parse coordinate: '{}' in format {} (expected {} components, found {})",
            input.trim(),
            format,
            expected,
            components.len()
        )));
    }

    let magnitude = match format {
        CoordinateFormat::Dd => parse_component(components[0], "degrees", true)?,
        CoordinateFormat::Dm => {
            let degrees = parse_component(components[0], "degrees", false)?;
            let minutes = parse_sexagesimal(components[1], "minutes", true)?;
            degrees + minutes / 60.0
        }
        CoordinateFormat::Dms => {
            let degrees = parse_component(components[0], "degrees", false)?;
            let minutes = parse_sexagesimal(components[1], "minutes", false)?;
            let seconds = parse_sexagesimal(components[2], "seconds", true)?;
            degrees + minutes / 60.0 + seconds / 3600.0
        }
    };

    let negative = match hemisphere {
        Some(letter) => {
            let southern = axis.hemisphere_sign(letter)?;
            if minus && !southern {
                return Err(ConverterError::InvalidCoordinate(format!(
                    "Negative value contradicts hemisphere '{}' in '{}'",
                    letter,
                    input.trim()
                )));
            }
            southern || minus
        }
        None => minus,
    };

    let value = if negative { -magnitude } else { magnitude };
    axis.validate(value)
}

/// Split a leading or trailing hemisphere letter off the coordinate body.
fn split_hemisphere(normalized: &str) -> Result<(&str, Option<char>)> {
    let mut body = normalized;
    let mut hemisphere = None;

    if let Some(last) = body.chars().last().filter(|c| c.is_alphabetic()) {
        hemisphere = Some(last);
        body = body[..body.len() - last.len_utf8()].trim_end();
    } else if let Some(first) = body.chars().next().filter(|c| c.is_alphabetic()) {
        hemisphere = Some(first);
        body = body[first.len_utf8()..].trim_start();
    }

    if let Some(letter) = hemisphere {
        if !matches!(letter, 'N' | 'S' | 'E' | 'W') {
            return Err(ConverterError::InvalidCoordinate(format!(
                "Unknown hemisphere indicator '{}'",
                letter
            )));
        }
    }

    if let Some(stray) = body.chars().find(|c| c.is_alphabetic()) {
        return Err(ConverterError::InvalidCoordinate(format!(
            "Unexpected character '{}' in '{}'",
            stray, normalized
        )));
    }

    Ok((body, hemisphere))
}

fn parse_component(token: &str, name: &str, allow_fraction: bool) -> Result<f64> {
    if !allow_fraction && token.contains('.') {
        return Err(ConverterError::InvalidCoordinate(format!(
            "Fractional {} are not allowed in this notation: '{}'",
            name, token
        )));
    }

    let value = token.parse::<f64>().map_err(|_| {
        ConverterError::InvalidCoordinate(format!("Invalid {} value: '{}'", name, token))
    })?;

    if !value.is_finite() || value < 0.0 {
        return Err(ConverterError::InvalidCoordinate(format!(
            "Invalid {} value: '{}'",
            name, token
        )));
    }

    Ok(value)
}

/// Minutes and seconds; exactly 60 is tolerated and carries when formatted.
fn parse_sexagesimal(token: &str, name: &str, allow_fraction: bool) -> Result<f64> {
    let value = parse_component(token, name, allow_fraction)?;
    if value > 60.0 {
        return Err(ConverterError::InvalidCoordinate(format!(
            "{} must be between 0 and 60, got: {}",
            capitalize(name),
            value
        )));
    }
    Ok(value)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert decimal degrees to a `D°MM'SS.sss"H` string
pub fn decimal_to_dms(decimal: f64, axis: Axis) -> Result<String> {
    format_dms(decimal, axis, DEFAULT_DMS_PRECISION)
}

/// Convert decimal degrees to DMS with `precision` decimal places on the seconds.
///
/// Rounding happens once on the total number of seconds, so a value such as
/// 1°16'59.9999" carries into `1°17'00"` instead of printing 60 seconds.
pub fn format_dms(decimal: f64, axis: Axis, precision: usize) -> Result<String> {
    let decimal = axis.validate(decimal)?;
    let precision = precision.min(MAX_DMS_PRECISION);

    let scale = 10u64.pow(precision as u32);
    let units_per_minute = 60 * scale;
    let units_per_degree = 3600 * scale;
    let units = (decimal.abs() * 3600.0 * scale as f64).round() as u64;

    let degrees = units / units_per_degree;
    let minutes = (units % units_per_degree) / units_per_minute;
    let second_units = units % units_per_minute;

    let seconds = if precision == 0 {
        format!("{:02}", second_units)
    } else {
        format!(
            "{:02}.{:0width$}",
            second_units / scale,
            second_units % scale,
            width = precision
        )
    };

    let hemisphere = axis.hemisphere_for(decimal < 0.0 && units > 0);
    Ok(format!(
        "{}°{:02}'{}\"{}",
        degrees, minutes, seconds, hemisphere
    ))
}

/// Round to a fixed number of decimal places for response payloads.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
