use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::error::{ConverterError, Result};
use crate::geodesy::Crs;
use crate::utils::constants::{
    DEFAULT_APP_NAME, DEFAULT_CONFIG_FILE, DEFAULT_HOST, DEFAULT_LOG_DIR,
    DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PORT, DEFAULT_TARGET_EPSG, ENV_PREFIX,
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Settings {
    #[validate(length(min = 1))]
    pub app_name: String,

    pub debug: bool,

    #[validate(length(min = 1))]
    pub log_level: String,

    pub log_dir: PathBuf,

    #[validate(length(min = 1))]
    pub host: String,

    pub port: u16,

    /// Number of HTTP workers; 0 means one per CPU
    pub workers: usize,

    #[validate(length(min = 1))]
    pub allowed_origin: String,

    pub target_epsg: u32,

    pub max_upload_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            debug: false,
            log_level: "info".to_string(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            workers: 0,
            allowed_origin: "*".to_string(),
            target_epsg: DEFAULT_TARGET_EPSG,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional TOML file and `CONVERTER_*` env vars.
    ///
    /// An explicit `path` must exist; the default `converter.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file_source = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings: Settings = Config::builder()
            .add_source(file_source)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.check()?;
        Ok(settings)
    }

    /// Validate field ranges and that the target CRS is one we can project to.
    pub fn check(&self) -> Result<()> {
        self.validate()?;
        if self.port == 0 {
            return Err(ConverterError::InvalidConfig("port must be non-zero".to_string()));
        }
        if self.max_upload_bytes < 1024 {
            return Err(ConverterError::InvalidConfig(format!(
                "max_upload_bytes must be at least 1024, got {}",
                self.max_upload_bytes
            )));
        }
        Crs::from_epsg(self.target_epsg)?;
        Ok(())
    }

    pub fn worker_count(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get()
        } else {
            self.workers
        }
    }
}
