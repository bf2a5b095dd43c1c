use crate::error::ConfigError;
use serde_derive::Deserialize;
use std::str::FromStr;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    pub fn log_level(&self) -> tracing::Level {
        tracing::Level::from_str(self.log_level.as_str()).unwrap_or(tracing::Level::INFO)
    }
}

pub(crate) fn load_app_config() -> Result<AppConfig, ConfigError> {
    envy::from_env::<AppConfig>().map_err(ConfigError::env_parse)
}

/// Source endpoint configuration. Sources are addressed `1..=count` by
/// appending the id to `base_url`.
#[derive(Deserialize, Debug, Clone)]
pub struct SourceConfig {
    pub base_url: String,
    pub count: u32,
}

pub fn load_source_config() -> Result<SourceConfig, ConfigError> {
    let config = envy::prefixed("SOURCE_")
        .from_env::<SourceConfig>()
        .map_err(ConfigError::env_parse)?;
    if config.count == 0 {
        return Err(ConfigError::invalid("SOURCE_COUNT", "must be positive"));
    }
    Ok(config)
}

fn default_max_attempts() -> u32 {
    3
}

fn default_delay_seconds() -> u64 {
    1
}

/// Per-source retry policy: `max_attempts` total attempts with a fixed
/// delay between them.
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_delay_seconds")]
    pub delay_seconds: u64,
}

pub fn load_retry_config() -> Result<RetryConfig, ConfigError> {
    let config = envy::prefixed("RETRY_")
        .from_env::<RetryConfig>()
        .map_err(ConfigError::env_parse)?;
    if config.max_attempts == 0 {
        return Err(ConfigError::invalid(
            "RETRY_MAX_ATTEMPTS",
            "must be positive",
        ));
    }
    Ok(config)
}

fn default_max_concurrent_fetches() -> usize {
    16
}

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct CollectorConfig {
    /// Cap on in-flight source requests within one cycle
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,
    /// Optional upper bound on a whole collect-and-process phase; unset
    /// bounds the cycle only by per-source retry budgets
    #[serde(default)]
    pub cycle_deadline_seconds: Option<u64>,
}

pub fn load_collector_config() -> Result<CollectorConfig, ConfigError> {
    envy::prefixed("COLLECTOR_")
        .from_env::<CollectorConfig>()
        .map_err(ConfigError::env_parse)
}

fn default_port() -> u16 {
    8080
}

#[derive(Deserialize, Debug)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

pub fn load_server_config() -> Result<ServerConfig, ConfigError> {
    envy::prefixed("SERVER_")
        .from_env::<ServerConfig>()
        .map_err(ConfigError::env_parse)
}
