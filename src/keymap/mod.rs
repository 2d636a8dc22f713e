//! Keyboard shortcuts: a preset (standard, vim or emacs) plus user overrides
//! read from the `[keymap]` table of the config file.
//!
//! ```toml
//! [keymap]
//! preset = "vim"
//!
//! [[keymap.overrides]]
//! key = "x"
//! action = "delete"
//! ```

mod actions;
mod binding;
mod presets;

pub use actions::Action;
pub use binding::{parse_key_string, KeyBinding, ParsedKey};
pub use presets::KeymapPreset;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Keymap {
    #[serde(default)]
    pub preset: KeymapPreset,

    /// Overriding an action hides every preset key for that action.
    #[serde(default)]
    pub overrides: Vec<KeyBinding>,
}

impl Keymap {
    pub fn with_preset(preset: KeymapPreset) -> Self {
        Self {
            preset,
            overrides: Vec::new(),
        }
    }

    pub fn get_action(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        self.all_bindings()
            .iter()
            .find(|binding| binding.matches(code, modifiers))
            .map(|binding| binding.action)
    }

    pub fn action_for(&self, key: &KeyEvent) -> Option<Action> {
        self.get_action(key.code, key.modifiers)
    }

    /// Effective bindings, overrides first.
    pub fn all_bindings(&self) -> Vec<KeyBinding> {
        let preset = self
            .preset
            .bindings()
            .into_iter()
            .filter(|binding| !self.overrides.iter().any(|o| o.action == binding.action));
        self.overrides.iter().cloned().chain(preset).collect()
    }

    /// `"↑/↓"` style hint for list movement.
    pub fn navigation_display(&self) -> String {
        format!(
            "{}/{}",
            self.get_key_display_for_action(Action::MoveUp),
            self.get_key_display_for_action(Action::MoveDown)
        )
    }

    /// `"Label: key"` footer entry for `action`.
    ///
    /// The label comes from the first binding's `hint`, if set.
    pub fn hint(&self, action: Action) -> String {
        match self.all_bindings().iter().find(|b| b.action == action) {
            Some(binding) => format!("{}: {}", binding.label(), binding.display()),
            None => format!("{}: -", action.label()),
        }
    }

    /// Footer entries for `actions`, joined with `" | "`.
    pub fn hints(&self, actions: &[Action]) -> String {
        actions
            .iter()
            .map(|&action| self.hint(action))
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// First key bound to `action`, formatted for a footer.
    pub fn get_key_display_for_action(&self, action: Action) -> String {
        self.all_bindings()
            .iter()
            .find(|binding| binding.action == action)
            .map_or_else(|| format!("{:?}", action), KeyBinding::display)
    }
}
