//! Console client configuration.
//!
//! Stored as YAML in the platform config directory
//! (`<config dir>/triage/config.yaml`), or wherever `TRIAGE_CONFIG` points.
//! `TRIAGE_BASE_URL` and `TRIAGE_SESSION` override the file.

use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TriageError};
use crate::remote::PageSize;
use crate::types::MANAGE_PATH;

pub const CONFIG_ENV: &str = "TRIAGE_CONFIG";
pub const BASE_URL_ENV: &str = "TRIAGE_BASE_URL";
pub const SESSION_ENV: &str = "TRIAGE_SESSION";

/// Keys accepted by `config get` / `config set`.
pub const CONFIG_KEYS: &[&str] = &[
    "base_url",
    "manage_path",
    "session_cookie",
    "default_page_size",
];

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Console root the endpoint paths are relative to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Management view to return to after state changes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_path: Option<String>,

    /// Raw `Cookie` header value of an authenticated session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_page_size: Option<u32>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("manage_path", &self.manage_path)
            .field(
                "session_cookie",
                &self.session_cookie.as_ref().map(|_| "[REDACTED]"),
            )
            .field("default_page_size", &self.default_page_size)
            .finish()
    }
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = env::var(CONFIG_ENV)
            && !path.is_empty()
        {
            return Ok(PathBuf::from(path));
        }

        ProjectDirs::from("", "", "triage")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
            .ok_or_else(|| {
                TriageError::Config(format!(
                    "no config directory available; set {CONFIG_ENV}"
                ))
            })
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Base URL from the environment or the config file.
    pub fn base_url(&self) -> Option<String> {
        if let Ok(url) = env::var(BASE_URL_ENV)
            && !url.is_empty()
        {
            return Some(url);
        }
        self.base_url.clone()
    }

    pub fn session_cookie(&self) -> Option<SecretString> {
        if let Ok(cookie) = env::var(SESSION_ENV)
            && !cookie.is_empty()
        {
            return Some(SecretString::from(cookie));
        }
        self.session_cookie.clone().map(SecretString::from)
    }

    pub fn manage_path(&self) -> &str {
        self.manage_path.as_deref().unwrap_or(MANAGE_PATH)
    }

    /// Validate and store one key.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "base_url" => {
                url::Url::parse(value)?;
                self.base_url = Some(value.to_string());
            }
            "manage_path" => {
                if !value.starts_with('/') {
                    return Err(TriageError::Config(format!(
                        "manage_path must be absolute, got '{value}'"
                    )));
                }
                self.manage_path = Some(value.to_string());
            }
            "session_cookie" => self.session_cookie = Some(value.to_string()),
            "default_page_size" => {
                let size: PageSize = value.parse()?;
                self.default_page_size = Some(size.get());
            }
            _ => {
                return Err(TriageError::Config(format!(
                    "unknown config key '{key}'. Valid keys: {}",
                    CONFIG_KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// Display value of one key. The session cookie is masked.
    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        let value = match key {
            "base_url" => self.base_url.clone(),
            "manage_path" => self.manage_path.clone(),
            "session_cookie" => self.session_cookie.as_deref().map(mask_sensitive_value),
            "default_page_size" => self.default_page_size.map(|s| s.to_string()),
            _ => {
                return Err(TriageError::Config(format!(
                    "unknown config key '{key}'. Valid keys: {}",
                    CONFIG_KEYS.join(", ")
                )));
            }
        };
        Ok(value)
    }
}

/// Mask a sensitive value by showing only the first 2 and last 2 characters
pub fn mask_sensitive_value(value: &str) -> String {
    let char_count = value.chars().count();
    if char_count > 4 {
        let first: String = value.chars().take(2).collect();
        let last: String = value.chars().skip(char_count - 2).collect();
        format!("{first}...{last}")
    } else {
        "****".to_string()
    }
}
