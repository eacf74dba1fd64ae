/// Service identity
pub const SERVICE_NAME: &str = "Coordinate Converter";
pub const DEFAULT_APP_NAME: &str = "Survey Grade Coordinate Converter";

/// Coordinate reference systems
pub const EPSG_WGS84: u32 = 4326;
pub const EPSG_ARC1960_UTM_37S: u32 = 21037;
pub const DEFAULT_TARGET_EPSG: u32 = EPSG_ARC1960_UTM_37S;

/// Output precision
pub const PROJECTED_DECIMALS: i32 = 3;
pub const GEOGRAPHIC_DECIMALS: i32 = 6;
pub const DEFAULT_DMS_PRECISION: usize = 3;
pub const MAX_DMS_PRECISION: usize = 6;

/// Accepted projected coordinate ranges for reverse conversion
pub const MIN_EASTING: f64 = 0.0;
pub const MAX_EASTING: f64 = 1_000_000.0;
pub const MIN_NORTHING: f64 = 0.0;
pub const MAX_NORTHING: f64 = 10_000_000.0;

/// Distance from the central meridian beyond which a forward conversion is flagged
pub const ZONE_ADVISORY_DEGREES: f64 = 6.0;

/// CSV handling
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
pub const SAMPLE_CSV_FILENAME: &str = "sample_coordinates.csv";
pub const CONVERTED_FILE_PREFIX: &str = "converted_";
pub const DEFAULT_UPLOAD_NAME: &str = "coordinates.csv";

/// Server defaults
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024; // 10MB
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_CONFIG_FILE: &str = "converter.toml";
pub const ENV_PREFIX: &str = "CONVERTER";

/// Audit log target
pub const AUDIT_TARGET: &str = "audit";
