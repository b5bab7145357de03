use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Url;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.energidataservice.dk";
const DEFAULT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 3;
const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024; // 16 MiB

/// Top-level application configuration loaded from file + environment.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub logging: LoggingSection,
}

impl AppConfig {
    /// Load configuration from `$ELSPOT_CONFIG` (or `config.toml`) and environment.
    pub fn load() -> Result<Self> {
        let config_path = env::var("ELSPOT_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from(Path::new(&config_path))
    }

    /// Load configuration from an explicit file path, then apply environment overrides.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = config::Config::builder();

        if config_path.exists() {
            builder = builder.add_source(config::File::from(PathBuf::from(config_path)));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("ELSPOT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder.build()?;
        let mut config: Self = settings
            .try_deserialize()
            .with_context(|| format!("invalid configuration in {}", config_path.display()))?;

        // Shortcut for the one setting most deployments override
        if let Ok(base_url) = env::var("ELSPOT_BASE_URL") {
            if !base_url.trim().is_empty() {
                config.upstream.base_url = base_url.trim().to_string();
            }
        }

        if config.logging.level.trim().is_empty() {
            config.logging.level = "info".to_string();
        }

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.upstream.validate()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Where and how the spot-price dataset is fetched.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub max_body_bytes: usize,
}

impl UpstreamConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(self.base_url.trim())
            .with_context(|| format!("upstream.base_url is not a valid URL: {}", self.base_url))?;

        if !matches!(url.scheme(), "http" | "https") {
            bail!(
                "upstream.base_url must use http or https, got '{}'",
                url.scheme()
            );
        }
        if self.timeout_secs == 0 {
            bail!("upstream.timeout_secs must be greater than zero");
        }
        if self.connect_timeout_secs == 0 {
            bail!("upstream.connect_timeout_secs must be greater than zero");
        }
        if self.max_body_bytes == 0 {
            bail!("upstream.max_body_bytes must be greater than zero");
        }

        Ok(())
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Text,
}
