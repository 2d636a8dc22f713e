//! Shared helpers for driving screens with synthetic key events.
#![allow(dead_code)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use secretly::config::Config;
use secretly::model::Project;
use secretly::screens::{Message, ProjectScreen, Screen, ScreenAction, ScreenContext};

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn press(screen: &mut ProjectScreen, config: &Config, code: KeyCode) -> ScreenAction {
    screen
        .handle_message(Message::Key(key(code)), &ScreenContext::new(config))
        .unwrap()
}

pub fn type_text(screen: &mut ProjectScreen, config: &Config, text: &str) {
    for c in text.chars() {
        press(screen, config, KeyCode::Char(c));
    }
}

/// Value of the secret called `name` in the environment called `env`.
pub fn value_in(project: &Project, env: &str, name: &str) -> Option<String> {
    project
        .environments
        .iter()
        .find(|e| e.name == env)?
        .secrets
        .iter()
        .find(|s| s.name == name)
        .map(|s| s.value.clone())
}

pub fn secret_count_in(project: &Project, env: &str) -> usize {
    project
        .environments
        .iter()
        .find(|e| e.name == env)
        .map_or(0, |e| e.secrets.len())
}
