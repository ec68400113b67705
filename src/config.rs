use anyhow::{Context, Result};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

const CONFIG_PATH_ENV: &str = "VEHICLE_MANAGER_CONFIG";

#[derive(Deserialize, Debug, Default, Clone)]
pub struct Config {
    pub api_url: String,
    pub request_timeout_seconds: Option<u64>,
    pub log_level: Option<String>,
}

pub fn create_test_config() -> Config {
    Config {
        api_url: "http://127.0.0.1:8000".to_string(),
        request_timeout_seconds: Some(5),
        log_level: None,
    }
}

pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).context("invalid config file")
}

/// Reads the TOML file named by `VEHICLE_MANAGER_CONFIG`, loading `.env` first.
pub fn read_config() -> Result<Config> {
    dotenv().ok();
    let config_path =
        env::var(CONFIG_PATH_ENV).with_context(|| format!("{CONFIG_PATH_ENV} .env not set"))?;
    let contents = std::fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read config from {config_path}"))?;
    parse_config(&contents)
}
