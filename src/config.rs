use crate::keymap::Keymap;
use crate::styles::ThemeType;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Color theme (default: dark)
    #[serde(default)]
    pub theme: ThemeType,
    /// JSON project snapshot served after sign-in; demo project if unset
    #[serde(default)]
    pub project_file: Option<PathBuf>,
    /// Event poll and spinner cadence in milliseconds (default: 100)
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// Rows of the secrets table shown at once (default: 7)
    #[serde(default = "default_table_height")]
    pub table_height: u16,
    /// Keyboard shortcuts (preset plus overrides)
    #[serde(default)]
    pub keymap: Keymap,
}

fn default_tick_rate_ms() -> u64 {
    100
}

fn default_table_height() -> u16 {
    7
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keymap: Keymap::default(),
            theme: ThemeType::default(),
            project_file: None,
            tick_rate_ms: default_tick_rate_ms(),
            table_height: default_table_height(),
        }
    }
}

impl Config {
    /// `<config_dir>/secretly/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("secretly")
            .join("config.toml")
    }

    /// Load configuration from file, writing the defaults on first run
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let mut config: Config =
                toml::from_str(&content).with_context(|| "Failed to parse config file")?;

            // Zero values would stall the event loop or hide the table
            if config.tick_rate_ms == 0 {
                config.tick_rate_ms = default_tick_rate_ms();
            }
            if config.table_height == 0 {
                config.table_height = default_table_height();
            }

            Ok(config)
        } else {
            let config = Self::default();
            config.save(config_path)?;
            Ok(config)
        }
    }

    /// Save configuration to file with secure permissions
    pub fn save(&self, config_path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        // 600: owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(config_path)
                .with_context(|| format!("Failed to get file metadata: {:?}", config_path))?
                .permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(config_path, perms)
                .with_context(|| format!("Failed to set file permissions: {:?}", config_path))?;
        }

        Ok(())
    }
}
