use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to read or parse the user config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Default API root when neither config file nor env override is present.
pub const DEFAULT_API_URL: &str = "http://localhost:4000/api";

/// User configuration, read from `<config_dir>/till/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

/// The directory config and session state live in: `TILL_CONFIG_DIR` if set,
/// otherwise `<config_dir>/till`.
#[must_use]
pub fn config_dir() -> PathBuf {
    env::var_os("TILL_CONFIG_DIR").map_or_else(
        || {
            dirs::config_dir()
                .unwrap_or_else(env::temp_dir)
                .join("till")
        },
        PathBuf::from,
    )
}

/// Load user config; a missing file yields defaults, a malformed one is an
/// error the caller surfaces (never silently ignored).
pub fn load_user_config() -> Result<UserConfig, ConfigError> {
    let path = config_dir().join("config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;

    toml::from_str::<UserConfig>(&content).map_err(|source| ConfigError::Parse { path, source })
}

/// Resolve the API root: `TILL_API_URL` env beats the config file value.
pub fn resolve_api_url() -> Result<String, ConfigError> {
    if let Ok(url) = env::var("TILL_API_URL") {
        if !url.trim().is_empty() {
            return Ok(url.trim_end_matches('/').to_string());
        }
    }
    let config = load_user_config()?;
    Ok(config.api_url.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::{UserConfig, DEFAULT_API_URL};

    #[test]
    fn missing_fields_use_defaults() {
        let cfg: UserConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn api_url_parses_from_toml() {
        let cfg: UserConfig = toml::from_str(r#"api_url = "https://pos.shop.test/api""#).unwrap();
        assert_eq!(cfg.api_url, "https://pos.shop.test/api");
    }
}
