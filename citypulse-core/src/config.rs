use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

pub const API_KEY_ENV: &str = "CITYPULSE_NEWS_API_KEY";

const APP_DIR: &str = "citypulse";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub news: NewsConfig,
    pub cities: Vec<String>,
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub language: String,
    pub page_size: u32,
    pub request_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            news: NewsConfig::default(),
            cities: [
                "New Delhi",
                "Mumbai",
                "Bengaluru",
                "Hyderabad",
                "Chennai",
                "Kolkata",
                "Pune",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            data_dir: None,
        }
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://newsapi.org".to_owned(),
            api_key: None,
            language: "en".to_owned(),
            page_size: 20,
            request_timeout_seconds: 10,
        }
    }
}

impl AppConfig {
    /// `~/.config/citypulse/config.json` on Linux.
    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join(APP_DIR).join("config.json"))
    }

    /// Loads the user's config, falling back to defaults, then applies env overrides.
    pub fn load() -> Self {
        let loaded = Self::config_file_path().and_then(|path| {
            if path.exists() {
                Self::load_from(&path)
            } else {
                Ok(Self::default())
            }
        });
        let mut config = loaded.unwrap_or_else(|error| {
            warn!(%error, "failed to load config, using defaults");
            Self::default()
        });
        config.apply_env();
        config
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            self.news.api_key = Some(key);
        }
        if self.news.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
            self.news.api_key = None;
        }
    }

    pub fn default_city(&self) -> &str {
        self.cities.first().map(String::as_str).unwrap_or("New Delhi")
    }

    /// Where persisted state lives, `~/.local/share/citypulse` unless configured.
    pub fn resolved_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        let mut dir = dirs::data_dir()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default();
        dir.push(APP_DIR);
        dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "news": { "api_key": "k" } }"#).unwrap();
        assert_eq!(config.news.api_key.as_deref(), Some("k"));
        assert_eq!(config.news.page_size, 20);
        assert_eq!(config.default_city(), "New Delhi");
        assert_eq!(config.cities.len(), 7);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut config = AppConfig::default();
        config.cities = vec!["Pune".into()];
        config.data_dir = Some(dir.path().join("data"));
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.cities, vec!["Pune".to_string()]);
        assert_eq!(loaded.resolved_data_dir(), dir.path().join("data"));
    }

    #[test]
    fn malformed_config_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
