//! Command line flags layered over the config file.

use crate::config::Config;
use crate::keymap::KeymapPreset;
use crate::styles::ThemeType;
use clap::Parser;
use std::path::PathBuf;

/// Browse and edit project secrets across environments
#[derive(Parser, Debug, Default)]
#[command(name = "secretly", version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// JSON project snapshot to open after sign-in
    #[arg(long, value_name = "PATH")]
    pub project: Option<PathBuf>,

    /// Color theme: dark, light or nocolor
    #[arg(long, value_name = "NAME")]
    pub theme: Option<ThemeType>,

    /// Disable colors in the TUI (also respects NO_COLOR env var)
    #[arg(long)]
    pub no_colors: bool,

    /// Keymap preset: standard, vim or emacs
    #[arg(long, value_name = "PRESET")]
    pub keymap: Option<KeymapPreset>,
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Apply flag overrides on top of a loaded config. Nothing is persisted.
    pub fn apply(&self, config: &mut Config) {
        if let Some(project) = &self.project {
            config.project_file = Some(project.clone());
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(preset) = self.keymap {
            config.keymap.preset = preset;
        }
        if self.no_colors || std::env::var_os("NO_COLOR").is_some() {
            config.theme = ThemeType::NoColor;
        }
    }
}
