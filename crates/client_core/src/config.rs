use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const API_URL_ENV: &str = "SOCIAL_MARKET_API_URL";
const APP_API_URL_ENV: &str = "APP__API_URL";
const LOCAL_CONFIG_FILE: &str = "social_market.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid api url '{value}': {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("api url '{0}' must use http or https")]
    UnsupportedScheme(String),
}

impl ClientSettings {
    /// Applies an explicit override, such as a command line flag, on top of
    /// the loaded settings.
    pub fn with_api_url(mut self, api_url: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(raw) = api_url {
            self.api_base_url = normalize_api_url(raw)?;
        }
        Ok(self)
    }
}

/// Resolves the settings from the first config file found, then the process
/// environment.
pub fn load_settings() -> Result<ClientSettings, ConfigError> {
    load_settings_from(&config_file_candidates(), |key| std::env::var(key).ok())
}

pub fn load_settings_from(
    candidates: &[PathBuf],
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientSettings, ConfigError> {
    let mut raw_url: Option<String> = None;

    if let Some(file_cfg) = read_first_config(candidates)? {
        if let Some(v) = file_cfg.api_url {
            raw_url = Some(v);
        }
    }

    if let Some(v) = env(API_URL_ENV) {
        raw_url = Some(v);
    }
    if let Some(v) = env(APP_API_URL_ENV) {
        raw_url = Some(v);
    }

    let api_base_url = match raw_url {
        Some(raw) => normalize_api_url(&raw)?,
        None => DEFAULT_API_URL.to_string(),
    };
    Ok(ClientSettings { api_base_url })
}

pub fn config_file_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("social_market").join("config.toml"));
    }
    candidates
}

fn read_first_config(candidates: &[PathBuf]) -> Result<Option<FileConfig>, ConfigError> {
    for path in candidates {
        match fs::read_to_string(path) {
            Ok(raw) => return parse_config(path, &raw).map(Some),
            Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
    Ok(None)
}

fn parse_config(path: &Path, raw: &str) -> Result<FileConfig, ConfigError> {
    toml::from_str(raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(DEFAULT_API_URL.to_string());
    }

    let parsed = Url::parse(trimmed).map_err(|source| ConfigError::InvalidUrl {
        value: raw.to_string(),
        source,
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(raw.to_string()));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
