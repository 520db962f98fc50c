use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application directory under the platform config and data dirs
const APP_DIR: &str = "tiledash";
const CONFIG_FILE: &str = "tiledash.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Config directory not found")]
    NoConfigDir,
    #[error("Data directory not found")]
    NoDataDir,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfigFile {
    pub storage: StorageConfig,
    pub grid: GridConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// Where the layout is persisted
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the key files (default: platform data dir)
    pub dir: Option<PathBuf>,
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            key: "dashboard-layout".to_string(),
        }
    }
}

impl StorageConfig {
    pub fn resolved_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.dir {
            Some(dir) => Ok(dir.clone()),
            None => data_dir(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GridConfig {
    /// Height of a row whose widgets have no preferred height
    pub row_height: u16,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { row_height: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct UiConfig {
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 250 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG`
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn resolved_file(&self) -> Result<PathBuf, ConfigError> {
        match &self.file {
            Some(file) => Ok(file.clone()),
            None => Ok(data_dir()?.join("tiledash.log")),
        }
    }
}

fn data_dir() -> Result<PathBuf, ConfigError> {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR))
        .ok_or(ConfigError::NoDataDir)
}

impl ConfigFile {
    pub fn load() -> Result<Self, ConfigError> {
        // Priority: ./tiledash.toml -> ~/.config/tiledash/tiledash.toml -> default
        let paths = [
            std::env::current_dir()?.join(CONFIG_FILE),
            dirs::config_dir()
                .ok_or(ConfigError::NoConfigDir)?
                .join(APP_DIR)
                .join(CONFIG_FILE),
        ];

        for path in paths {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(Self::default())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ConfigFile::parse("").unwrap();
        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.storage.key, "dashboard-layout");
        assert_eq!(config.ui.tick_rate_ms, 250);
    }

    #[test]
    fn test_partial_sections() {
        let config = ConfigFile::parse(
            r#"
            [storage]
            dir = "/tmp/tiledash"

            [grid]
            row_height = 6
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.key, "dashboard-layout");
        assert_eq!(
            config.storage.resolved_dir().unwrap(),
            PathBuf::from("/tmp/tiledash")
        );
        assert_eq!(config.grid.row_height, 6);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            ConfigFile::parse("[grid]\nrow_height = \"tall\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tiledash.toml");
        std::fs::write(&path, "[storage]\nkey = \"work-layout\"\n[logging]\nlevel = \"debug\"\n")
            .unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.storage.key, "work-layout");
        assert_eq!(config.logging.level, "debug");
        assert!(ConfigFile::load_from(&dir.path().join("missing.toml")).is_err());
    }
}
