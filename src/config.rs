//! Configuration
//!
//! Settings come from an optional TOML file with per-field defaults, then
//! command-line overrides on top. Defaults put all scratch and output state
//! under the system temp directory, so the service runs with no config file
//! at all.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

fn default_port() -> u16 {
    5750
}

fn default_database_path() -> String {
    "retrograde.db".to_string()
}

fn default_output_dir() -> PathBuf {
    std::env::temp_dir().join("retrograde").join("outputs")
}

fn default_work_dir() -> PathBuf {
    std::env::temp_dir().join("retrograde").join("work")
}

fn default_max_upload_bytes() -> usize {
    50 * 1024 * 1024
}

/// Service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// SQLite database file path.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Directory finished artifacts are stored in.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Root under which per-request workspaces are created.
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,

    /// Hard cap on accepted upload size.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            database_path: default_database_path(),
            output_dir: default_output_dir(),
            work_dir: default_work_dir(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub database_path: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub work_dir: Option<PathBuf>,
    pub max_upload_bytes: Option<usize>,
}

impl Config {
    /// Load configuration from `path` (defaults throughout if `None`),
    /// then apply overrides.
    pub fn load(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("cannot read {}: {}", path.display(), e))
                })?;
                toml::from_str(&text).map_err(|e| {
                    Error::Config(format!("invalid config {}: {}", path.display(), e))
                })?
            }
            None => Config::default(),
        };

        if let Some(port) = overrides.port {
            config.port = port;
        }
        if let Some(database_path) = overrides.database_path {
            config.database_path = database_path;
        }
        if let Some(output_dir) = overrides.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(work_dir) = overrides.work_dir {
            config.work_dir = work_dir;
        }
        if let Some(max_upload_bytes) = overrides.max_upload_bytes {
            config.max_upload_bytes = max_upload_bytes;
        }

        if config.max_upload_bytes == 0 {
            return Err(Error::Config(
                "max_upload_bytes must be greater than zero".to_string(),
            ));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::load(None, ConfigOverrides::default()).unwrap();
        assert_eq!(config.port, 5750);
        assert_eq!(config.database_path, "retrograde.db");
        assert_eq!(config.max_upload_bytes, 50 * 1024 * 1024);
        assert!(config.output_dir.ends_with("retrograde/outputs"));
        assert!(config.work_dir.ends_with("retrograde/work"));
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 9000").unwrap();
        writeln!(file, "database_path = \"/var/lib/retrograde.db\"").unwrap();

        let config = Config::load(Some(file.path()), ConfigOverrides::default()).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.database_path, "/var/lib/retrograde.db");
        assert_eq!(config.max_upload_bytes, 50 * 1024 * 1024);
    }

    #[test]
    fn test_overrides_beat_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 9000").unwrap();

        let overrides = ConfigOverrides {
            port: Some(7000),
            output_dir: Some(PathBuf::from("/srv/out")),
            ..Default::default()
        };
        let config = Config::load(Some(file.path()), overrides).unwrap();
        assert_eq!(config.port, 7000);
        assert_eq!(config.output_dir, PathBuf::from("/srv/out"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Config::load(
            Some(Path::new("/nonexistent/retrograde.toml")),
            ConfigOverrides::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = \"not a number\"").unwrap();

        let err = Config::load(Some(file.path()), ConfigOverrides::default()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_zero_upload_cap_rejected() {
        let overrides = ConfigOverrides {
            max_upload_bytes: Some(0),
            ..Default::default()
        };
        let err = Config::load(None, overrides).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
