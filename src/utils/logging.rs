use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Settings;
use crate::error::{ConverterError, Result};
use crate::utils::constants::AUDIT_TARGET;
use crate::utils::filename::generate_log_filename;

/// Install the global subscriber: compact stdout output plus a daily log file.
///
/// `RUST_LOG` takes precedence over the configured level. `verbose` forces
/// debug output for this crate.
pub fn init_logging(settings: &Settings, verbose: bool) -> Result<()> {
    let level = if verbose || settings.debug {
        "debug"
    } else {
        settings.log_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("coordinate_converter={level},{AUDIT_TARGET}=info,warn")));

    fs::create_dir_all(&settings.log_dir)?;
    let log_path = generate_log_filename(&settings.log_dir);
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .try_init()
        .map_err(|e| ConverterError::Logging(e.to_string()))?;

    info!("Logging to {}", log_path.display());
    Ok(())
}

#[derive(Debug, Serialize)]
struct AuditEntry<'a> {
    timestamp: DateTime<Local>,
    conversion_type: &'a str,
    original_coordinates: &'a Value,
    converted_coordinates: &'a Value,
    user_agent: &'a str,
}

/// Record a conversion on the audit target as a single JSON line.
pub fn log_conversion(original: &Value, converted: &Value, conversion_type: &str, user_agent: &str) {
    let entry = AuditEntry {
        timestamp: Local::now(),
        conversion_type,
        original_coordinates: original,
        converted_coordinates: converted,
        user_agent,
    };

    match serde_json::to_string(&entry) {
        Ok(json) => info!(target: AUDIT_TARGET, "Conversion performed: {}", json),
        Err(err) => warn!("Could not serialize audit entry: {}", err),
    }
}
