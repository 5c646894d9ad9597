use crate::{CliError, Result};
use flowmart_api::{ClientConfig, Environment, Timeouts};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not find home directory")]
    NoHomeDirectory,

    #[error("Unknown config key '{0}' (expected one of: {keys})", keys = CONFIG_KEYS.join(", "))]
    UnknownKey(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Config directory creation failed: {0}")]
    DirectoryCreationFailed(String),

    #[error("TOML parsing error: {0}")]
    TomlError(String),
}

/// Keys accepted by `config get|set|unset`.
pub const CONFIG_KEYS: [&str; 5] = [
    "api.base_url",
    "api.environment",
    "timeouts.connect_ms",
    "timeouts.read_ms",
    "timeouts.write_ms",
];

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ApiSection {
    pub base_url: Option<String>,
    /// `development` or `production`
    pub environment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TimeoutsSection {
    pub connect_ms: Option<u64>,
    pub read_ms: Option<u64>,
    pub write_ms: Option<u64>,
}

/// Contents of `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ConfigData {
    pub api: Option<ApiSection>,
    pub timeouts: Option<TimeoutsSection>,
}

/// Configuration file plus the directory it lives in.
#[derive(Debug, Clone)]
pub struct Config {
    pub config_path: PathBuf,
    pub data: ConfigData,
}

impl Config {
    /// Load `~/.flowmart/config.toml`, or defaults if it does not exist yet.
    pub fn new() -> Result<Self> {
        Self::load_from(&get_config_dir()?)
    }

    pub fn load_from(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join("config.toml");

        let data = if config_path.exists() {
            debug!("Loading config from {}", config_path.display());
            let content = fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| ConfigError::TomlError(e.to_string()))?
        } else {
            debug!("No config at {}, using defaults", config_path.display());
            ConfigData::default()
        };

        Ok(Config { config_path, data })
    }

    pub fn config_dir(&self) -> &Path {
        self.config_path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Where the bearer token is persisted between runs.
    pub fn credentials_path(&self) -> PathBuf {
        self.config_dir().join("credentials")
    }

    /// Write to a temporary file, then rename over the real one.
    pub fn save(&self) -> Result<()> {
        let content = toml::to_string_pretty(&self.data)
            .map_err(|e| ConfigError::TomlError(e.to_string()))?;

        if let Some(parent) = self.config_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| ConfigError::DirectoryCreationFailed(e.to_string()))?;
            }
        }

        let temp_path = self.config_path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &self.config_path)?;

        debug!("Saved config to {}", self.config_path.display());
        Ok(())
    }

    pub fn show_config(&self) -> String {
        toml::to_string_pretty(&self.data).unwrap_or_else(|_| "Error formatting config".to_string())
    }

    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        let api = self.data.api.as_ref();
        let timeouts = self.data.timeouts.as_ref();

        let value = match key {
            "api.base_url" => api.and_then(|a| a.base_url.clone()),
            "api.environment" => api.and_then(|a| a.environment.clone()),
            "timeouts.connect_ms" => timeouts.and_then(|t| t.connect_ms).map(|v| v.to_string()),
            "timeouts.read_ms" => timeouts.and_then(|t| t.read_ms).map(|v| v.to_string()),
            "timeouts.write_ms" => timeouts.and_then(|t| t.write_ms).map(|v| v.to_string()),
            other => return Err(ConfigError::UnknownKey(other.to_string()).into()),
        };
        Ok(value)
    }

    /// Validate and store `value` under `key`. Not persisted until [`Config::save`].
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "api.base_url" => {
                if !url_is_valid(value) {
                    return Err(invalid(key, value));
                }
                self.api_mut().base_url = Some(value.to_string());
            }
            "api.environment" => {
                let environment: Environment = value.parse().map_err(|_| invalid(key, value))?;
                self.api_mut().environment = Some(environment_name(environment).to_string());
            }
            "timeouts.connect_ms" | "timeouts.read_ms" | "timeouts.write_ms" => {
                let millis: u64 = value
                    .parse()
                    .ok()
                    .filter(|ms| *ms > 0)
                    .ok_or_else(|| invalid(key, value))?;
                let timeouts = self.data.timeouts.get_or_insert_with(TimeoutsSection::default);
                match key {
                    "timeouts.connect_ms" => timeouts.connect_ms = Some(millis),
                    "timeouts.read_ms" => timeouts.read_ms = Some(millis),
                    _ => timeouts.write_ms = Some(millis),
                }
            }
            other => return Err(ConfigError::UnknownKey(other.to_string()).into()),
        }
        Ok(())
    }

    pub fn unset_value(&mut self, key: &str) -> Result<()> {
        match key {
            "api.base_url" => self.api_mut().base_url = None,
            "api.environment" => self.api_mut().environment = None,
            "timeouts.connect_ms" | "timeouts.read_ms" | "timeouts.write_ms" => {
                let timeouts = self.data.timeouts.get_or_insert_with(TimeoutsSection::default);
                match key {
                    "timeouts.connect_ms" => timeouts.connect_ms = None,
                    "timeouts.read_ms" => timeouts.read_ms = None,
                    _ => timeouts.write_ms = None,
                }
            }
            other => return Err(ConfigError::UnknownKey(other.to_string()).into()),
        }

        // Drop sections that became empty so the file stays tidy
        if self.data.api.as_ref() == Some(&ApiSection::default()) {
            self.data.api = None;
        }
        if self.data.timeouts.as_ref() == Some(&TimeoutsSection::default()) {
            self.data.timeouts = None;
        }
        Ok(())
    }

    /// Client settings: library defaults, then this file, then `FLOWMART_*`
    /// environment variables.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::default();
        self.apply_to(&mut config)?;
        Ok(config.overlay_env()?)
    }

    fn apply_to(&self, config: &mut ClientConfig) -> Result<()> {
        if let Some(api) = &self.data.api {
            if let Some(base_url) = &api.base_url {
                config.base_url = base_url.clone();
            }
            if let Some(environment) = &api.environment {
                config.environment = environment
                    .parse()
                    .map_err(|_| invalid("api.environment", environment))?;
            }
        }

        if let Some(timeouts) = &self.data.timeouts {
            let Timeouts {
                connect,
                read,
                write,
            } = config.timeouts;
            config.timeouts = Timeouts {
                connect: timeouts.connect_ms.map(Duration::from_millis).unwrap_or(connect),
                read: timeouts.read_ms.map(Duration::from_millis).unwrap_or(read),
                write: timeouts.write_ms.map(Duration::from_millis).unwrap_or(write),
            };
        }
        Ok(())
    }

    fn api_mut(&mut self) -> &mut ApiSection {
        self.data.api.get_or_insert_with(ApiSection::default)
    }
}

fn get_config_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
    Ok(home_dir.join(".flowmart"))
}

fn invalid(field: &str, value: &str) -> CliError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
    .into()
}

fn url_is_valid(value: &str) -> bool {
    flowmart_api::client::normalize_base_url(value).is_ok()
}

fn environment_name(environment: Environment) -> &'static str {
    match environment {
        Environment::Development => "development",
        Environment::Production => "production",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(dir.path()).unwrap();
        assert_eq!(config.data, ConfigData::default());
        assert_eq!(config.credentials_path(), dir.path().join("credentials"));
    }

    #[test]
    fn test_set_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::load_from(dir.path()).unwrap();
        config.set_value("api.base_url", "http://localhost:8000/api").unwrap();
        config.set_value("api.environment", "dev").unwrap();
        config.set_value("timeouts.read_ms", "2500").unwrap();
        config.save().unwrap();

        let reloaded = Config::load_from(dir.path()).unwrap();
        assert_eq!(
            reloaded.get_value("api.base_url").unwrap().as_deref(),
            Some("http://localhost:8000/api")
        );
        assert_eq!(
            reloaded.get_value("api.environment").unwrap().as_deref(),
            Some("development")
        );
        assert_eq!(reloaded.get_value("timeouts.read_ms").unwrap().as_deref(), Some("2500"));
        assert_eq!(reloaded.get_value("timeouts.connect_ms").unwrap(), None);

        let content = fs::read_to_string(dir.path().join("config.toml")).unwrap();
        assert!(content.contains("[timeouts]"));
        assert!(content.contains("read_ms = 2500"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::load_from(dir.path()).unwrap();

        assert!(config.set_value("api.base_url", "not a url").is_err());
        assert!(config.set_value("api.environment", "staging").is_err());
        assert!(config.set_value("timeouts.write_ms", "0").is_err());
        assert!(config.set_value("timeouts.write_ms", "fast").is_err());
        assert!(matches!(
            config.set_value("api.api_key", "x"),
            Err(CliError::Config(ConfigError::UnknownKey(_)))
        ));
        assert_eq!(config.data, ConfigData::default());
    }

    #[test]
    fn test_unset_drops_empty_sections() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::load_from(dir.path()).unwrap();
        config.set_value("timeouts.connect_ms", "100").unwrap();
        config.unset_value("timeouts.connect_ms").unwrap();
        assert_eq!(config.data.timeouts, None);
    }

    #[test]
    fn test_file_values_override_client_defaults() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::load_from(dir.path()).unwrap();
        config.set_value("api.base_url", "http://localhost:9000/").unwrap();
        config.set_value("timeouts.connect_ms", "750").unwrap();

        let mut client = ClientConfig::default();
        config.apply_to(&mut client).unwrap();
        assert_eq!(client.base_url, "http://localhost:9000/");
        assert_eq!(client.timeouts.connect, Duration::from_millis(750));
        assert_eq!(client.timeouts.read, Duration::from_secs(60));
    }

    #[test]
    fn test_malformed_file_is_a_toml_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "[api\nbase_url = ").unwrap();
        assert!(matches!(
            Config::load_from(dir.path()),
            Err(CliError::Config(ConfigError::TomlError(_)))
        ));
    }
}
