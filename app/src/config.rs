use anyhow::{Context, Result};
use std::path::PathBuf;

/// Uploaded images may not exceed this many bytes unless `MAX_UPLOAD_BYTES` says otherwise
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    /// JSON file holding `ExportSettings`
    pub export_settings: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            rust_log: "info".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            export_settings: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: match std::env::var("PORT") {
                Ok(port) => port
                    .parse::<u16>()
                    .context("PORT must be a valid port number")?,
                Err(_) => defaults.port,
            },
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            max_upload_bytes: match std::env::var("MAX_UPLOAD_BYTES") {
                Ok(limit) => limit
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                Err(_) => defaults.max_upload_bytes,
            },
            export_settings: std::env::var_os("EXPORT_SETTINGS").map(PathBuf::from),
        })
    }

    /// Body limit for JSON routes, whose payloads embed base64 images
    pub fn max_json_bytes(&self) -> usize {
        self.max_upload_bytes.saturating_mul(4)
    }
}
