//! Theme and style system.
//!
//! A [`Theme`] is built once from configuration and handed to every render
//! call through [`crate::screens::RenderContext`]; there is no process-wide
//! style state.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// List selection indicator shown next to the selected item
pub const LIST_HIGHLIGHT_SYMBOL: &str = "> ";

/// Theme type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeType {
    #[default]
    Dark,
    Light,
    /// Disable all UI colors (equivalent to `NO_COLOR=1` / `--no-colors`)
    #[serde(alias = "no-color", alias = "no_color")]
    NoColor,
}

impl FromStr for ThemeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dark" => Ok(ThemeType::Dark),
            "light" => Ok(ThemeType::Light),
            "nocolor" | "no-color" | "no_color" => Ok(ThemeType::NoColor),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

/// Colors of one themed palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Titles and the project heading
    pub accent: Color,
    pub success: Color,
    pub error: Color,
    pub text: Color,
    pub muted: Color,
    /// Key hints and the device code URL
    pub emphasis: Color,
    pub border: Color,
    pub border_focused: Color,
    pub selected_fg: Color,
    pub selected_bg: Color,
    pub spinner: Color,
}

impl Palette {
    pub const DARK: Palette = Palette {
        accent: Color::Cyan,
        success: Color::Green,
        error: Color::Red,
        text: Color::White,
        muted: Color::DarkGray,
        emphasis: Color::Yellow,
        border: Color::Indexed(240),
        border_focused: Color::Cyan,
        selected_fg: Color::Indexed(229),
        selected_bg: Color::Indexed(57),
        spinner: Color::Indexed(205),
    };

    pub const LIGHT: Palette = Palette {
        accent: Color::Blue,
        success: Color::Green,
        error: Color::Red,
        text: Color::Black,
        muted: Color::DarkGray,
        emphasis: Color::Blue,
        border: Color::DarkGray,
        border_focused: Color::Blue,
        selected_fg: Color::White,
        selected_bg: Color::Blue,
        spinner: Color::Magenta,
    };
}

/// Style source for every widget. Without a palette only text modifiers are
/// used.
#[derive(Debug, Clone)]
pub struct Theme {
    pub theme_type: ThemeType,
    palette: Option<Palette>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn new(theme_type: ThemeType) -> Self {
        let palette = match theme_type {
            ThemeType::Dark => Some(Palette::DARK),
            ThemeType::Light => Some(Palette::LIGHT),
            ThemeType::NoColor => None,
        };
        Self {
            theme_type,
            palette,
        }
    }

    pub fn dark() -> Self {
        Self::new(ThemeType::Dark)
    }

    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// Foreground from the palette, or `plain` when colors are off.
    fn fg_or(&self, color: impl Fn(&Palette) -> Color, plain: Modifier) -> Style {
        match &self.palette {
            Some(palette) => Style::default().fg(color(palette)),
            None => Style::default().add_modifier(plain),
        }
    }

    pub fn title_style(&self) -> Style {
        self.fg_or(|p| p.accent, Modifier::empty())
            .add_modifier(Modifier::BOLD)
    }

    pub fn text_style(&self) -> Style {
        self.fg_or(|p| p.text, Modifier::empty())
    }

    pub fn muted_style(&self) -> Style {
        self.fg_or(|p| p.muted, Modifier::DIM)
    }

    pub fn emphasis_style(&self) -> Style {
        self.fg_or(|p| p.emphasis, Modifier::empty())
            .add_modifier(Modifier::BOLD)
    }

    pub fn success_style(&self) -> Style {
        self.fg_or(|p| p.success, Modifier::BOLD)
    }

    pub fn error_style(&self) -> Style {
        self.fg_or(|p| p.error, Modifier::BOLD)
    }

    pub fn border_focused_style(&self) -> Style {
        self.fg_or(|p| p.border_focused, Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        self.fg_or(|p| p.border, Modifier::empty())
    }

    /// Selected table row or list item.
    pub fn highlight_style(&self) -> Style {
        match &self.palette {
            Some(p) => Style::default().fg(p.selected_fg).bg(p.selected_bg),
            None => Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    pub fn spinner_style(&self) -> Style {
        self.fg_or(|p| p.spinner, Modifier::empty())
    }

    pub fn placeholder_style(&self) -> Style {
        self.muted_style()
    }
}
