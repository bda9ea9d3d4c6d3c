use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// The application's configuration.
#[derive(Clone)]
pub struct Config {
    /// Path of the JSON file holding the registration records.
    pub data_file: PathBuf,
    /// Path of the JSON catalog of recommendable sessions.
    pub catalog_file: PathBuf,
    /// Directory where app.log and error.log are written.
    pub log_dir: PathBuf,
    /// Port the server listens on.
    pub port: u16,
    /// Session inactivity window in minutes.
    pub session_ttl_minutes: i64,
}

impl Config {
    /// Creates a new `Config` from environment variables, with defaults
    /// matching the on-disk layout of the original deployment.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            data_file: env::var("DATA_FILE")
                .unwrap_or_else(|_| "data/usuarios.json".to_string())
                .into(),
            catalog_file: env::var("CATALOG_FILE")
                .unwrap_or_else(|_| "data/sesiones.json".to_string())
                .into(),
            log_dir: env::var("LOG_DIR")
                .unwrap_or_else(|_| "logs".to_string())
                .into(),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("Invalid PORT")?,
            session_ttl_minutes: env::var("SESSION_TTL_MINUTES")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("Invalid SESSION_TTL_MINUTES")?,
        })
    }
}
