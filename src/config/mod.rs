//! Configuration management

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;

pub const DEFAULT_BASE_URL: &str = "https://api.dev.freshfuels.ca/v2";
const ENV_PREFIX: &str = "SECUREVIEW";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request HTTP timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Page length used by list views
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
            username: None,
            password: None,
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Credentials, when both halves are configured and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Some((u, p)),
            _ => None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> u32 {
    20
}

/// Directory holding `config.*` and the persisted session.
pub fn get_config_dir() -> PathBuf {
    directories::ProjectDirs::from("ca", "freshfuels", "secureview")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&get_config_dir())
}

pub fn load_config_from(config_dir: &std::path::Path) -> Result<Config> {
    let config = ::config::Config::builder()
        // Start with defaults
        .set_default("base_url", DEFAULT_BASE_URL)?
        .set_default("timeout_secs", default_timeout_secs() as i64)?
        .set_default("page_size", default_page_size() as i64)?
        // Load from config file if it exists
        .add_source(
            ::config::File::with_name(&config_dir.join("config").to_string_lossy())
                .required(false),
        )
        // Override with environment variables (SECUREVIEW_BASE_URL, SECUREVIEW_PAGE_SIZE, etc.)
        .add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(dir.path()).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.page_size, 20);
        assert!(config.credentials().is_none());
    }

    #[test]
    #[serial]
    fn test_file_then_env_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "base_url = \"https://file.example/v2\"\npage_size = 50\nusername = \"ops\"\n",
        )
        .unwrap();

        std::env::set_var("SECUREVIEW_PAGE_SIZE", "10");
        let config = load_config_from(dir.path());
        std::env::remove_var("SECUREVIEW_PAGE_SIZE");
        let config = config.unwrap();

        assert_eq!(config.base_url, "https://file.example/v2");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.username.as_deref(), Some("ops"));
        // Password missing, so no credentials
        assert!(config.credentials().is_none());
    }
}
