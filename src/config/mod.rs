mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(&config_path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;
    config.validate()?;

    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.model.path.is_empty() {
            return Err(Error::config("model.path must not be empty"));
        }
        let t = self.thresholds.decision_threshold;
        if !(t > 0.0 && t <= 1.0) {
            return Err(Error::config(format!(
                "thresholds.decision_threshold must be in (0, 1], got {}",
                t
            )));
        }
        let u = self.thresholds.uncertain_threshold;
        if !(0.0..=1.0).contains(&u) {
            return Err(Error::config(format!(
                "thresholds.uncertain_threshold must be in [0, 1], got {}",
                u
            )));
        }
        Ok(())
    }
}
