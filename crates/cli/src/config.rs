//! Configuration management for the Brandmark CLI
//!
//! Loaded from and saved to ~/.brandmark/config.toml

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub downloads: DownloadsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_url")]
    pub url: String,
}

fn default_server_url() -> String {
    "http://localhost:3002".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownloadsConfig {
    /// Where downloaded logos are written. Current directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl Config {
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".brandmark")
            .join("config.toml")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn download_dir(&self) -> PathBuf {
        self.downloads
            .directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get a configuration value by key path (e.g., "server.url")
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "server.url" => Some(self.server.url.clone()),
            "downloads.directory" => Some(self.download_dir().display().to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key path. Does not save.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "server.url" => {
                let url = value.trim().trim_end_matches('/');
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    anyhow::bail!("server.url must start with http:// or https://");
                }
                self.server.url = url.to_string();
            }
            "downloads.directory" => {
                let dir = value.trim();
                self.downloads.directory = (!dir.is_empty()).then(|| PathBuf::from(dir));
            }
            _ => anyhow::bail!("Unknown configuration key: {}", key),
        }
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["server.url", "downloads.directory"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server.url, "http://localhost:3002");
        assert_eq!(config.download_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("server.url", "https://brand.example.com/").unwrap();
        config.set("downloads.directory", "/tmp/logos").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.server.url, "https://brand.example.com");
        assert_eq!(loaded.get("downloads.directory").unwrap(), "/tmp/logos");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[downloads]\ndirectory = \"out\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server.url, "http://localhost:3002");
        assert_eq!(config.download_dir(), PathBuf::from("out"));
    }

    #[test]
    fn test_rejects_unknown_key_and_bad_url() {
        let mut config = Config::default();
        assert!(config.set("server.api_key", "x").is_err());
        assert!(config.set("server.url", "localhost:3002").is_err());
        assert_eq!(config.get("nope"), None);
    }
}
