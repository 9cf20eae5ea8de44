use std::{fs, net::SocketAddr, path::Path};

use anyhow::Context;
use fehler::throws;
use serde::Deserialize;
use tracing::info;

pub const DEFAULT_CONFIG: &str = "config/server.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub bind: SocketAddr,
    /// path or http(s) url of the problem data
    pub data: String,
    /// used when the url field is submitted empty
    pub default_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 3000)),
            data: "data.json".to_owned(),
            default_url: "https://atcoder.jp/contests/agc006/tasks/agc006_c".to_owned(),
        }
    }
}

impl Config {
    #[throws(anyhow::Error)]
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("could not read config {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("could not parse config {}", path.display()))?
    }

    /// Like [`Config::new`], but a missing file means every key keeps its default.
    #[throws(anyhow::Error)]
    pub fn new_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if path.exists() {
            Self::new(path)?
        } else {
            info!(path = %path.display(), "no config file, using defaults");
            Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() -> anyhow::Result<()> {
        let config: Config = toml::from_str("")?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn shipped_config_parses() -> anyhow::Result<()> {
        let config = Config::new(DEFAULT_CONFIG)?;
        assert_eq!(config.data, "data.json");
        assert_eq!(config.bind.port(), 3000);
        Ok(())
    }

    #[test]
    fn missing_config_file_uses_defaults() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let config = Config::new_or_default(dir.path().join("server.toml"))?;
        assert_eq!(config, Config::default());

        assert_eq!(Config::new_or_default(DEFAULT_CONFIG)?, Config::new(DEFAULT_CONFIG)?);
        assert!(Config::new(dir.path().join("server.toml")).is_err());
        Ok(())
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<Config>("github_client_id = \"x\"").is_err());
    }
}
