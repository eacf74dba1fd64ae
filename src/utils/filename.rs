use chrono::{Datelike, Local};
use std::path::{Path, PathBuf};

use crate::utils::constants::{CONVERTED_FILE_PREFIX, DEFAULT_UPLOAD_NAME};

/// Generate the daily log filename with format: converter_{YYYYMMDD}.log
pub fn generate_log_filename(log_dir: &Path) -> PathBuf {
    let now = Local::now();
    let filename = format!(
        "converter_{:04}{:02}{:02}.log",
        now.year(),
        now.month(),
        now.day()
    );
    log_dir.join(filename)
}

/// Name of the CSV returned for an uploaded file: converted_{name}
pub fn converted_filename(original: &str) -> String {
    // Browsers may send a full client path; keep the last component only
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned: String = base
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '"' | ';'))
        .collect();

    let name = if cleaned.is_empty() {
        DEFAULT_UPLOAD_NAME.to_string()
    } else {
        cleaned
    };

    format!("{}{}", CONVERTED_FILE_PREFIX, name)
}

/// Default output path next to the input file for the CLI batch command
pub fn default_batch_output(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let converted = converted_filename(&name);
    match input.parent() {
        Some(parent) => parent.join(converted),
        None => PathBuf::from(converted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_log_filename() {
        let filename = generate_log_filename(Path::new("logs"));
        let filename_str = filename.to_string_lossy();

        assert!(filename_str.starts_with("logs/converter_"));
        assert!(filename_str.ends_with(".log"));

        // converter_ + 8 digits + .log
        let file_part = filename.file_name().unwrap().to_string_lossy();
        assert_eq!(file_part.len(), "converter_".len() + 8 + ".log".len());
    }

    #[test]
    fn test_converted_filename() {
        assert_eq!(converted_filename("points.csv"), "converted_points.csv");
        assert_eq!(
            converted_filename("C:\\Users\\survey\\points.csv"),
            "converted_points.csv"
        );
        assert_eq!(converted_filename("a\"b;.csv"), "converted_ab.csv");
        assert_eq!(converted_filename(""), "converted_coordinates.csv");
    }

    #[test]
    fn test_default_batch_output() {
        let output = default_batch_output(Path::new("data/points.csv"));
        assert_eq!(output, PathBuf::from("data/converted_points.csv"));
    }
}
