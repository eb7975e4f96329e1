//! Runtime configuration
//!
//! Read from the environment once at startup.

use std::path::PathBuf;

use thiserror::Error;

/// Environment variable holding the FoodData Central API key
pub const API_KEY_VAR: &str = "USDA_API_KEY";
pub const BASE_URL_VAR: &str = "PDA_FDC_BASE_URL";
pub const REPORT_DIR_VAR: &str = "PDA_REPORT_DIR";

pub const DEFAULT_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("API key missing: set the USDA_API_KEY environment variable")]
    MissingCredential,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// FoodData Central API key; analysis refuses to start without one
    pub api_key: Option<String>,
    pub base_url: String,
    /// Default directory for generated reports
    pub report_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            report_dir: PathBuf::from("reports"),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();
        Self {
            api_key: get(API_KEY_VAR),
            base_url: get(BASE_URL_VAR)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            report_dir: get(REPORT_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.report_dir),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingCredential)
    }
}
