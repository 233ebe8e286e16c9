use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const CONFIG_DIR_PREFIX: &str = "n26-cli";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub n26: N26Config,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct N26Config {
    pub username: String,
    pub password: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file()?;

        if !config_path.exists() {
            return Err(AppError::Config(format!(
                "Config file not found at {:?}. Please create one.",
                config_path
            )));
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {}", e)))?;

        if config.n26.username.is_empty() || config.n26.password.is_empty() {
            return Err(AppError::Config(
                "N26 username and password must be set in config file".to_string(),
            ));
        }

        Ok(config)
    }

    fn xdg_dirs() -> xdg::BaseDirectories {
        xdg::BaseDirectories::with_prefix(CONFIG_DIR_PREFIX)
    }

    /// Get the config file path
    pub fn config_file() -> Result<PathBuf> {
        let xdg_dirs = Self::xdg_dirs();
        xdg_dirs
            .place_config_file("config.toml")
            .map_err(|e| AppError::Config(format!("Failed to create config directory: {}", e)))
    }
}
