use std::time::Duration;

use search::SearchConfig;
use serde::Deserialize;
use tracing::warn;

/// Non-secret settings, read from `Config{CONFIG}.toml`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: Server,
    pub cors: Cors,
    pub store: Store,
    pub gemini: Gemini,
    pub analytics: Analytics,
    pub search: SearchConfig,
}

impl Config {
    pub fn load(config_name: &str) -> anyhow::Result<Self> {
        util::load_config(config_name)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(config_name: &str) -> anyhow::Result<Self> {
        let path = util::workspace_dir().join(config_name);
        if !path.exists() {
            warn!(
                task = "load config",
                path = %path.display(),
                "config file not found, using defaults"
            );
            return Ok(Self::default());
        }

        Self::load(config_name)
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Self { port: 8000 }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Cors {
    pub origins: Vec<String>,
}

impl Default for Cors {
    fn default() -> Self {
        Self {
            origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Store {
    pub timeout_secs: u64,
    pub max_connections: u32,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            max_connections: 5,
        }
    }
}

impl Store {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Gemini {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for Gemini {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-flash-latest".to_string(),
            timeout_secs: 60,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Analytics {
    pub table: String,
    pub timeout_secs: u64,
}

impl Default for Analytics {
    fn default() -> Self {
        Self {
            table: "search_events".to_string(),
            timeout_secs: 5,
        }
    }
}

#[cfg(test)]
mod test {
    use search::Interpretation;

    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        // Arrange
        let text = r#"
            [cors]
            origins = ["https://buscador.afland.es"]

            [search]
            cities = ["Sevilla"]

            [search.ambiguous]
            granaino = ["city", "artist"]
        "#;

        // Act
        let config: Config = toml::from_str(text).unwrap();

        // Assert
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.cors.origins, ["https://buscador.afland.es"]);
        assert_eq!(config.analytics.table, "search_events");
        assert!(config.search.hide_incomplete);
        assert_eq!(
            config.search.ambiguity("Granaino"),
            Some([Interpretation::City, Interpretation::Artist].as_slice())
        );
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        // Arrange
        let name = "Config.does-not-exist.toml";

        // Act
        let config = Config::load_or_default(name).unwrap();

        // Assert
        assert!(Config::load(name).is_err());
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.analytics.table, "search_events");
        assert!(config.search.hide_incomplete);
    }

    #[test]
    fn test_present_file_is_loaded_not_defaulted() {
        let config = Config::load_or_default("Config.toml").unwrap();

        assert_ne!(config.cors.origins, Cors::default().origins);
        assert!(config
            .cors
            .origins
            .contains(&"https://buscador.afland.es".to_string()));
    }

    #[test]
    fn test_workspace_config_file_parses() {
        let config = Config::load("Config.toml").unwrap();

        assert!(!config.cors.origins.is_empty());
        assert!(config.search.known_city("sevilla").is_some());
        assert_eq!(config.store.timeout(), Duration::from_secs(5));
    }
}
