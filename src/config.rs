//! Site configuration.
//!
//! Configuration is deliberately small: an optional `site.toml` in the data
//! directory sets the site base URL, and the `SITE_URL` environment variable
//! overrides it (that is how the deploy pipeline points staging builds at a
//! different host). Everything falls back to the production URL.
//!
//! ```toml
//! # site.toml — all options optional, defaults shown
//! base_url = "https://zen-retraite.fr"
//! ```
//!
//! The base URL is used for canonical links, Open Graph metadata, and sitemap
//! locations. Trailing slashes are stripped so joining paths stays uniform.
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

pub const DEFAULT_BASE_URL: &str = "https://zen-retraite.fr";

/// Site configuration loaded from `site.toml` plus the `SITE_URL` override.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute site origin used for canonical URLs and the sitemap.
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl SiteConfig {
    /// Apply the environment override and strip trailing slashes.
    pub fn with_env_override(mut self, site_url: Option<String>) -> Self {
        if let Some(url) = site_url
            && !url.trim().is_empty()
        {
            self.base_url = url;
        }
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        self
    }

    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Validation("base_url must not be empty".into()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        Ok(())
    }
}

/// Load the site config for a data directory: `site.toml` if present, stock
/// defaults otherwise, then the `SITE_URL` environment override.
pub fn load_config(data_dir: &Path) -> Result<SiteConfig, ConfigError> {
    let path = data_dir.join("site.toml");
    let config = if path.exists() {
        toml::from_str(&fs::read_to_string(&path)?)?
    } else {
        SiteConfig::default()
    };
    let config = config.with_env_override(std::env::var("SITE_URL").ok());
    config.validate()?;
    Ok(config)
}

/// A documented stock `site.toml`, printed by `zen-press gen-config`.
pub fn stock_config_toml() -> String {
    format!(
        "\
# zen-press site configuration
# Place this file as site.toml in the data directory.
# All options are optional — defaults shown below.

# Absolute site origin for canonical links and the sitemap.
# Overridden by the SITE_URL environment variable when set.
base_url = \"{DEFAULT_BASE_URL}\"
"
    )
}
