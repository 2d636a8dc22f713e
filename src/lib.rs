//! Secretly - a terminal client for project secrets
//!
//! Browse a project's environments, and add, edit or delete the secrets they
//! hold through keyboard-driven forms.

// Core modules
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod error;
pub mod forms;
pub mod keymap;
pub mod model;
pub mod screens;
pub mod services;
pub mod styles;
pub mod tui;
pub mod utils;
pub mod widgets;

// Re-exports for convenience
pub use config::Config;
pub use error::SecretlyError;
pub use model::{Environment, Project, Secret};

// Keymap re-exports (used by Config and for external API)
pub use keymap::{Action, KeyBinding, Keymap, KeymapPreset};
