use crate::model::ConfigError;
use crate::utils::ClockStyle;
use serde::Deserialize;
use std::fs;

pub const DEFAULT_SEARCH_URL: &str = "https://flights-server-7dq6.onrender.com/search";

/// One search as the user would type it into the form.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchInput {
    pub origin: String,
    pub destination: String,
    pub date: String,
    #[serde(default = "default_passengers")]
    pub passengers: String,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_search_url")]
    pub search_url: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default)]
    pub clock: ClockStyle,
    #[serde(default)]
    pub searches: Vec<SearchInput>,
}

fn default_search_url() -> String {
    DEFAULT_SEARCH_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_passengers() -> String {
    "1".to_string()
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    Ok(config)
}
