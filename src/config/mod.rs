mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

/// Environment variable holding the model credential. Takes precedence over
/// `model.api_key` in the file.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

pub const MAX_RETRIES: u32 = 5;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    let mut config = load_from_path(&config_path).await?;
    apply_api_key_override(&mut config, env::var(API_KEY_ENV).ok());
    config.validate()?;
    Ok(config)
}

pub async fn load_from_path(config_path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(config_path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}

pub fn apply_api_key_override(config: &mut Config, api_key: Option<String>) {
    if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
        debug!("Using API key from {}", API_KEY_ENV);
        config.model.api_key = key;
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        let model = &self.model;
        if model.api_key.trim().is_empty() {
            return Err(Error::config(format!(
                "model.api_key is empty; set it in the config file or via {}",
                API_KEY_ENV
            )));
        }
        if model.model.trim().is_empty() {
            return Err(Error::config("model.model must not be empty"));
        }
        if model.timeout_secs == 0 || model.connect_timeout_secs == 0 {
            return Err(Error::config("model timeouts must be greater than zero"));
        }
        if model.max_retries > MAX_RETRIES {
            return Err(Error::config(format!(
                "model.max_retries must be at most {}, got {}",
                MAX_RETRIES, model.max_retries
            )));
        }

        let generation = &model.generation;
        if !(0.0..=2.0).contains(&generation.temperature) {
            return Err(Error::config(format!(
                "generation.temperature must be within 0..=2, got {}",
                generation.temperature
            )));
        }
        if !(0.0..=1.0).contains(&generation.top_p) {
            return Err(Error::config(format!(
                "generation.top_p must be within 0..=1, got {}",
                generation.top_p
            )));
        }
        if generation.top_k == 0 || generation.max_output_tokens == 0 {
            return Err(Error::config(
                "generation.top_k and generation.max_output_tokens must be greater than zero",
            ));
        }
        if self.server.max_upload_bytes == 0 {
            return Err(Error::config("server.max_upload_bytes must be greater than zero"));
        }

        Ok(())
    }
}
