use crate::errors::{Result, SdkError};
use log::debug;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://flowmart.banit.co.ke/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(60_000);

pub const ENV_BASE_URL: &str = "FLOWMART_BASE_URL";
pub const ENV_API_KEY: &str = "FLOWMART_API_KEY";
pub const ENV_TIMEOUT_MS: &str = "FLOWMART_TIMEOUT_MS";
pub const ENV_ENVIRONMENT: &str = "FLOWMART_ENV";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Duration,
    pub read: Duration,
    pub write: Duration,
}

impl Timeouts {
    /// Same limit for all three phases.
    pub fn uniform(timeout: Duration) -> Self {
        Self {
            connect: timeout,
            read: timeout,
            write: timeout,
        }
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self::uniform(DEFAULT_TIMEOUT)
    }
}

/// Deployment flavour. Development additionally traces response bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn logs_bodies(self) -> bool {
        self == Environment::Development
    }
}

impl FromStr for Environment {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(SdkError::Config(format!("Unknown environment '{}'", other))),
        }
    }
}

/// Everything needed to build a [`crate::FlowMart`] instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeouts: Timeouts,
    /// Token seeded into the credential store at construction, if any.
    pub initial_token: Option<String>,
    pub environment: Environment,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeouts: Timeouts::default(),
            initial_token: None,
            environment: Environment::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.initial_token = Some(token.into());
        self
    }

    /// Defaults overlaid with `FLOWMART_BASE_URL`, `FLOWMART_API_KEY`,
    /// `FLOWMART_TIMEOUT_MS` and `FLOWMART_ENV`.
    pub fn from_env() -> Result<Self> {
        Self::default().overlay_env()
    }

    /// Replace the fields set through `FLOWMART_*` variables, keep the rest.
    pub fn overlay_env(self) -> Result<Self> {
        self.overlay_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::overlay_env`] but reads variables through `lookup`.
    pub fn overlay_lookup<F>(self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = self;
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(base_url) = present(ENV_BASE_URL) {
            debug!("Using base URL from {}: {}", ENV_BASE_URL, base_url);
            config.base_url = base_url;
        }

        if let Some(token) = present(ENV_API_KEY) {
            debug!("Found API key in {}", ENV_API_KEY);
            config.initial_token = Some(token);
        }

        if let Some(raw) = present(ENV_TIMEOUT_MS) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&ms| ms > 0)
                .ok_or_else(|| {
                    SdkError::Config(format!(
                        "{} must be a positive number of milliseconds, got '{}'",
                        ENV_TIMEOUT_MS, raw
                    ))
                })?;
            config.timeouts = Timeouts::uniform(Duration::from_millis(millis));
        }

        if let Some(raw) = present(ENV_ENVIRONMENT) {
            config.environment = raw.parse()?;
        }

        Ok(config)
    }
}
