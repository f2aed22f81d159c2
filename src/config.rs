//! Application configuration file support.
//!
//! Configuration is read from a TOML file (`routiney.toml`) with serde
//! defaults for every setting, then overridden by environment variables
//! (`HOST`, `PORT`). The `[directory]` section seeds the local backend's
//! directory data: rooms, teachers, groups, and subjects the scheduler may
//! reference.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Application configuration from file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub directory: DirectorySettings,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Seed data for the local backend's directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectorySettings {
    #[serde(default)]
    pub rooms: Vec<i64>,
    #[serde(default)]
    pub teachers: Vec<String>,
    #[serde(default)]
    pub groups: Vec<i64>,
    #[serde(default)]
    pub subjects: Vec<i64>,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from the default locations, falling back to
    /// defaults when no file exists.
    ///
    /// Searches for `routiney.toml` in the current directory and the parent
    /// directory.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from("routiney.toml"),
            PathBuf::from("../routiney.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Apply `HOST`/`PORT` environment overrides on top of the file values.
    pub fn apply_env_overrides(mut self) -> Self {
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        self
    }

    /// The socket address string to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert!(config.directory.rooms.is_empty());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[server]
port = 9090
"#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn test_parse_directory_seed() {
        let toml = r#"
[directory]
rooms = [1, 2, 3]
teachers = ["a@school.edu.np", "b@school.edu.np"]
groups = [10]
subjects = [100, 101]
"#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.directory.rooms, vec![1, 2, 3]);
        assert_eq!(config.directory.teachers.len(), 2);
        assert_eq!(config.directory.groups, vec![10]);
        assert_eq!(config.directory.subjects, vec![100, 101]);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nhost = \"127.0.0.1\"\nport = 3000").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server").unwrap();

        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
