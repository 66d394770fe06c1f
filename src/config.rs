use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn default_rows_per_page() -> usize {
    10
}

fn default_server_side() -> bool {
    true
}

/// Persisted viewer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Catalog opened when none is given on the command line
    #[serde(default)]
    pub catalog_path: Option<String>,
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: usize,
    /// Fetch pages in the background instead of paging in the widget
    #[serde(default = "default_server_side")]
    pub server_side: bool,
    #[serde(default)]
    pub hide_title: bool,
    /// Artificial delay added to every page fetch
    #[serde(default)]
    pub latency_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            rows_per_page: default_rows_per_page(),
            server_side: default_server_side(),
            hide_title: false,
            latency_ms: 0,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".galaxy-table"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Default location of the log file
    pub fn log_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("galaxy-table.log"))
    }

    pub fn load() -> Option<Config> {
        Self::load_from(&Self::config_path()?)
    }

    /// Read a config file; a missing or malformed file yields `None`
    pub fn load_from(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }

        let contents = fs::read_to_string(path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        // Create config directory if it doesn't exist
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: Config = serde_json::from_str(r#"{"hide_title": true}"#).unwrap();
        assert_eq!(
            config,
            Config {
                hide_title: true,
                ..Config::default()
            }
        );
        assert_eq!(config.rows_per_page, 10);
        assert!(config.server_side);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            catalog_path: Some("/data/galaxies.csv".to_string()),
            rows_per_page: 25,
            server_side: false,
            hide_title: true,
            latency_ms: 300,
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path), Some(config));
    }

    #[test]
    fn test_load_missing_or_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert_eq!(Config::load_from(&path), None);

        fs::write(&path, "not json").unwrap();
        assert_eq!(Config::load_from(&path), None);
    }
}
