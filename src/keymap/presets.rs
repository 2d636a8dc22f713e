//! Built-in keymaps. Each preset only decides list movement; every preset
//! shares the form keys and the secret shortcuts.

use super::{Action, KeyBinding};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KeymapPreset {
    /// Arrow keys
    #[default]
    Standard,
    /// j/k plus arrows
    Vim,
    /// Ctrl+N/P plus arrows, Ctrl+G cancels
    Emacs,
}

type Table = &'static [(&'static str, Action)];

const SHARED: Table = &[
    ("enter", Action::Confirm),
    ("esc", Action::Cancel),
    ("space", Action::ToggleSelect),
    ("q", Action::Quit),
    ("ctrl+c", Action::Quit),
    ("n", Action::Create),
    ("N", Action::Create),
    ("a", Action::Create),
    ("A", Action::Create),
    ("e", Action::Edit),
    ("d", Action::Delete),
    ("tab", Action::NextField),
    ("shift+tab", Action::PrevField),
    ("backspace", Action::Backspace),
    ("delete", Action::DeleteChar),
    ("left", Action::MoveLeft),
    ("right", Action::MoveRight),
    ("home", Action::Home),
    ("end", Action::End),
];

const ARROWS: Table = &[("up", Action::MoveUp), ("down", Action::MoveDown)];

const VIM: Table = &[("k", Action::MoveUp), ("j", Action::MoveDown)];

const EMACS: Table = &[
    ("ctrl+p", Action::MoveUp),
    ("ctrl+n", Action::MoveDown),
    ("ctrl+b", Action::MoveLeft),
    ("ctrl+f", Action::MoveRight),
    ("ctrl+a", Action::Home),
    ("ctrl+e", Action::End),
    ("ctrl+d", Action::DeleteChar),
    ("ctrl+g", Action::Cancel),
];

impl KeymapPreset {
    /// Preset keys first, so they win display lookups over the shared ones.
    pub fn bindings(&self) -> Vec<KeyBinding> {
        let own: &[Table] = match self {
            KeymapPreset::Standard => &[ARROWS],
            KeymapPreset::Vim => &[VIM, ARROWS],
            KeymapPreset::Emacs => &[EMACS, ARROWS],
        };
        own.iter()
            .chain(std::iter::once(&SHARED))
            .flat_map(|&table| table.iter())
            .map(|&(key, action)| KeyBinding::new(key, action))
            .collect()
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeymapPreset::Standard => "Standard",
            KeymapPreset::Vim => "Vim",
            KeymapPreset::Emacs => "Emacs",
        }
    }
}

impl FromStr for KeymapPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" | "default" => Ok(KeymapPreset::Standard),
            "vim" => Ok(KeymapPreset::Vim),
            "emacs" => Ok(KeymapPreset::Emacs),
            other => Err(format!("Unknown keymap preset: {}", other)),
        }
    }
}
