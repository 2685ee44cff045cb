//! Application configuration loading from fintrack.toml
//!
//! An optional TOML file supplies defaults for the database URL and the
//! directory export files are written to. Environment variables
//! (`DATABASE_URL`, `FINTRACK_EXPORT_DIR`) override the file.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration structure representing the fintrack.toml file
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    /// Database connection URL (e.g. `sqlite://data/fintrack.sqlite?mode=rwc`)
    pub database_url: Option<String>,
    /// Directory export workbooks are written to
    pub export_dir: Option<PathBuf>,
}

/// Resolved application configuration after merging file and environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database connection URL
    pub database_url: String,
    /// Directory export workbooks are written to
    pub export_dir: PathBuf,
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_file_config<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse fintrack.toml: {e}"),
    })
}

/// Loads the application configuration.
///
/// Reads `./fintrack.toml` when present (a missing file is not an error),
/// then applies environment overrides and fills in defaults.
pub fn load_app_config() -> Result<AppConfig> {
    let file = if Path::new("fintrack.toml").exists() {
        load_file_config("fintrack.toml")?
    } else {
        FileConfig::default()
    };

    let database_url = std::env::var("DATABASE_URL")
        .ok()
        .or(file.database_url)
        .unwrap_or_else(|| super::database::DEFAULT_DATABASE_URL.to_string());

    let export_dir = std::env::var("FINTRACK_EXPORT_DIR")
        .ok()
        .map(PathBuf::from)
        .or(file.export_dir)
        .unwrap_or_else(|| PathBuf::from("exports"));

    Ok(AppConfig {
        database_url,
        export_dir,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: FileConfig = toml::from_str(
            r#"
            database_url = "sqlite://data/test.sqlite"
            export_dir = "out"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.database_url.as_deref(),
            Some("sqlite://data/test.sqlite")
        );
        assert_eq!(config.export_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_parse_empty_config() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.database_url.is_none());
        assert!(config.export_dir.is_none());
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let result = load_file_config("no/such/fintrack.toml");
        assert!(result.is_err());
    }
}
