//! Key strings as written in the config file, and matching them against
//! terminal events.

use super::Action;
use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};

/// One entry of a keymap, as written under `[[keymap.overrides]]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBinding {
    /// `"j"`, `"down"`, `"ctrl+n"`, `"shift+tab"`
    pub key: String,
    pub action: Action,
    /// Hint text; falls back to [`Action::label`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Key code plus modifiers, normalized so config keys and terminal events
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl ParsedKey {
    /// Normalize a key event as reported by the terminal.
    ///
    /// Terminals report Shift+Tab as `BackTab` with SHIFT set, and shifted
    /// characters already carry their case, so SHIFT is dropped for both.
    pub fn from_event(code: KeyCode, modifiers: KeyModifiers) -> Self {
        let modifiers = match code {
            KeyCode::BackTab | KeyCode::Char(_) => modifiers.difference(KeyModifiers::SHIFT),
            _ => modifiers,
        };
        Self { code, modifiers }
    }
}

impl KeyBinding {
    pub fn new(key: &str, action: Action) -> Self {
        Self {
            key: key.to_owned(),
            action,
            hint: None,
        }
    }

    /// Unparseable key strings never match.
    pub fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.parse()
            .is_ok_and(|parsed| parsed == ParsedKey::from_event(code, modifiers))
    }

    pub fn parse(&self) -> Result<ParsedKey, String> {
        parse_key_string(&self.key)
    }

    /// Key as shown in hints, e.g. `"Ctrl+n"`.
    pub fn display(&self) -> String {
        format_key_display(&self.key)
    }

    pub fn label(&self) -> &str {
        self.hint.as_deref().unwrap_or(self.action.label())
    }
}

/// Named keys: accepted spellings, key code, and how hints show it.
const NAMED_KEYS: &[(&[&str], KeyCode, &str)] = &[
    (&["up", "arrow_up"], KeyCode::Up, "↑"),
    (&["down", "arrow_down"], KeyCode::Down, "↓"),
    (&["left", "arrow_left"], KeyCode::Left, "←"),
    (&["right", "arrow_right"], KeyCode::Right, "→"),
    (&["home"], KeyCode::Home, "Home"),
    (&["end"], KeyCode::End, "End"),
    (&["enter", "return"], KeyCode::Enter, "Enter"),
    (&["esc", "escape"], KeyCode::Esc, "Esc"),
    (&["space"], KeyCode::Char(' '), "Space"),
    (&["tab"], KeyCode::Tab, "Tab"),
    (&["backtab"], KeyCode::BackTab, "Shift+Tab"),
    (&["backspace", "bs"], KeyCode::Backspace, "Backspace"),
    (&["delete", "del"], KeyCode::Delete, "Del"),
];

const MODIFIER_NAMES: &[(&[&str], KeyModifiers, &str)] = &[
    (&["ctrl", "control"], KeyModifiers::CONTROL, "Ctrl"),
    (&["alt", "option"], KeyModifiers::ALT, "Alt"),
    (&["shift"], KeyModifiers::SHIFT, "Shift"),
    (&["super", "meta", "cmd", "command"], KeyModifiers::SUPER, "Cmd"),
];

fn lookup<T: Copy>(
    table: &[(&[&str], T, &'static str)],
    name: &str,
) -> Option<(T, &'static str)> {
    table
        .iter()
        .find(|(names, _, _)| names.contains(&name))
        .map(|&(_, value, display)| (value, display))
}

/// Parse a key string like `"ctrl+n"`, `"shift+tab"` or `"N"`.
///
/// A lone character is taken literally, case included, so `"N"` and `"n"`
/// bind separately. Everything else is case-insensitive.
pub fn parse_key_string(key: &str) -> Result<ParsedKey, String> {
    let trimmed = key.trim();
    let mut chars = trimmed.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(ParsedKey {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
        });
    }

    let lower = trimmed.to_lowercase();
    let (prefix, name) = match lower.rsplit_once('+') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, lower.as_str()),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in prefix.into_iter().flat_map(|p| p.split('+')) {
        let (modifier, _) = lookup(MODIFIER_NAMES, part.trim())
            .ok_or_else(|| format!("Unknown modifier: {}", part))?;
        modifiers |= modifier;
    }

    let code = match lookup(NAMED_KEYS, name.trim()) {
        Some((code, _)) => code,
        None => single_char(name).ok_or_else(|| format!("Unknown key: {}", name))?,
    };

    // Terminals never report Shift+Tab as Tab
    if code == KeyCode::Tab && modifiers.contains(KeyModifiers::SHIFT) {
        return Ok(ParsedKey::from_event(KeyCode::BackTab, modifiers));
    }
    Ok(ParsedKey::from_event(code, modifiers))
}

fn single_char(name: &str) -> Option<KeyCode> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(KeyCode::Char(c)),
        _ => None,
    }
}

/// Human form of a key string for footers, e.g. `"ctrl+c"` -> `"Ctrl+c"`.
pub fn format_key_display(key: &str) -> String {
    key.split('+')
        .map(|part| {
            let part = part.trim();
            let lower = part.to_lowercase();
            lookup(MODIFIER_NAMES, &lower)
                .map(|(_, display)| display)
                .or_else(|| lookup(NAMED_KEYS, &lower).map(|(_, display)| display))
                .map_or_else(|| part.to_string(), str::to_string)
        })
        .collect::<Vec<_>>()
        .join("+")
}
