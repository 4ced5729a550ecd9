use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;
use toml::{map::Map, Value};

/// Root of the cargo workspace, or the current directory when the binary
/// runs outside of cargo.
pub fn workspace_dir() -> PathBuf {
    locate_project()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_default()
}

fn locate_project() -> Option<PathBuf> {
    let output = std::process::Command::new(env!("CARGO"))
        .arg("locate-project")
        .arg("--workspace")
        .arg("--message-format=plain")
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let cargo_path = String::from_utf8(output.stdout).ok()?;
    Path::new(cargo_path.trim()).parent().map(Path::to_path_buf)
}

pub fn load_config<T: DeserializeOwned>(config_name: &str) -> anyhow::Result<T> {
    let path = workspace_dir().join(config_name);
    let config = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    toml::from_str::<T>(&config)
        .with_context(|| format!("failed to parse {config_name}"))
}

/// Secret lookup: the process environment first, then `Secrets.toml`.
#[derive(Debug, Default, Clone)]
pub struct Secrets {
    file: Map<String, Value>,
}

impl Secrets {
    pub fn from_toml(secrets: &str) -> anyhow::Result<Self> {
        let file = toml::from_str::<Map<String, Value>>(secrets)
            .context("failed to parse Secrets.toml")?;

        Ok(Self { file })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .or_else(|| self.file.get(key)?.as_str().map(str::to_string))
            .filter(|value| !value.trim().is_empty())
    }

    pub fn require(&self, key: &str) -> anyhow::Result<String> {
        self.get(key)
            .with_context(|| format!("{key} is not set in env or Secrets.toml"))
    }
}

/// A missing `Secrets.toml` is not an error; the environment may hold
/// everything.
pub fn load_env() -> anyhow::Result<Secrets> {
    let path = workspace_dir().join("Secrets.toml");
    if !path.exists() {
        return Ok(Secrets::default());
    }

    let secrets = std::fs::read_to_string(&path)
        .context("failed to read Secrets.toml")?;

    Secrets::from_toml(&secrets)
}

#[cfg(test)]
mod test {
    use serde::Deserialize;

    use super::*;

    #[test]
    fn test_secrets_fall_back_to_file() {
        // Arrange
        let secrets = Secrets::from_toml(
            r#"
            UTIL_TEST_FILE_ONLY = "from-file"
            UTIL_TEST_BLANK = "  "
            "#,
        )
        .unwrap();

        // Act
        let value = secrets.get("UTIL_TEST_FILE_ONLY");

        // Assert
        assert_eq!(value.as_deref(), Some("from-file"));
        assert_eq!(secrets.get("UTIL_TEST_BLANK"), None);
        assert!(secrets.require("UTIL_TEST_MISSING").is_err());
    }

    #[test]
    fn test_env_wins_over_file() {
        std::env::set_var("UTIL_TEST_BOTH", "from-env");
        let secrets =
            Secrets::from_toml(r#"UTIL_TEST_BOTH = "from-file""#).unwrap();

        let value = secrets.require("UTIL_TEST_BOTH").unwrap();

        assert_eq!(value, "from-env");
    }

    #[test]
    fn test_load_config_reads_workspace_file() {
        #[derive(Deserialize)]
        struct Server {
            port: u16,
        }
        #[derive(Deserialize)]
        struct Config {
            server: Server,
        }

        let config = load_config::<Config>("Config.toml").unwrap();

        assert!(config.server.port > 0);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config::<Map<String, Value>>("Config.missing.toml");

        assert!(result.is_err());
    }
}
