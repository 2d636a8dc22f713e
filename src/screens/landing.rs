//! Landing screen: the first thing shown after launch.

use crate::components::Footer;
use crate::keymap::Action;
use crate::screens::screen_trait::{Message, RenderContext, Screen, ScreenAction, ScreenContext};
use crate::styles::LIST_HIGHLIGHT_SYMBOL;
use anyhow::Result;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingChoice {
    Login,
    About,
    Exit,
}

impl LandingChoice {
    pub const ALL: [LandingChoice; 3] = [Self::Login, Self::About, Self::Exit];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::About => "About",
            Self::Exit => "Exit",
        }
    }
}

const ABOUT_TEXT: &str = "Secretly keeps your team's environment variables in one place. \
Sign in with a device code, then browse, add, edit and delete secrets across \
every environment of your project.";

#[derive(Debug, Default)]
pub struct LandingScreen {
    cursor: usize,
    show_about: bool,
    /// Message carried back from an abandoned login
    status: Option<String>,
}

impl LandingScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Landing screen showing `message` in its status line.
    pub fn with_status(message: impl Into<String>) -> Self {
        Self {
            status: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn selected(&self) -> LandingChoice {
        LandingChoice::ALL[self.cursor]
    }

    pub fn is_about_visible(&self) -> bool {
        self.show_about
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn choose(&mut self) -> ScreenAction {
        match self.selected() {
            LandingChoice::Login => ScreenAction::SwitchToLogin,
            LandingChoice::About => {
                self.show_about = !self.show_about;
                ScreenAction::None
            }
            LandingChoice::Exit => ScreenAction::Exit,
        }
    }
}

impl Screen for LandingScreen {
    fn handle_message(&mut self, message: Message, ctx: &ScreenContext) -> Result<ScreenAction> {
        let Message::Key(key) = message else {
            return Ok(ScreenAction::None);
        };

        let action = ctx.keymap().action_for(&key);
        debug!("Landing key {:?} -> {:?}", key.code, action);
        Ok(match action {
            Some(Action::MoveUp) => {
                self.cursor = self.cursor.saturating_sub(1);
                ScreenAction::None
            }
            Some(Action::MoveDown) => {
                self.cursor = (self.cursor + 1).min(LandingChoice::ALL.len() - 1);
                ScreenAction::None
            }
            Some(Action::Confirm) | Some(Action::ToggleSelect) => self.choose(),
            Some(Action::Quit) => ScreenAction::Exit,
            _ => ScreenAction::None,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let theme = ctx.theme;
        let about_height = if self.show_about { 5 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(LandingChoice::ALL.len() as u16),
                Constraint::Length(1),
                Constraint::Length(about_height),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(area);

        let welcome = Paragraph::new(vec![
            Line::default(),
            Line::styled("Welcome to Secretly CLI!", theme.title_style()),
        ]);
        frame.render_widget(welcome, chunks[0]);

        let blank = " ".repeat(LIST_HIGHLIGHT_SYMBOL.chars().count());
        let items: Vec<Line> = LandingChoice::ALL
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                if i == self.cursor {
                    Line::from(vec![
                        Span::styled(LIST_HIGHLIGHT_SYMBOL, theme.emphasis_style()),
                        Span::styled(choice.label(), theme.emphasis_style()),
                    ])
                } else {
                    Line::from(vec![
                        Span::raw(blank.clone()),
                        Span::styled(choice.label(), theme.text_style()),
                    ])
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(items), chunks[1]);

        if self.show_about {
            let about = Paragraph::new(ABOUT_TEXT)
                .style(theme.text_style())
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .title(" About ")
                        .borders(Borders::ALL)
                        .border_style(theme.border_style()),
                );
            frame.render_widget(about, chunks[3]);
        }

        if let Some(status) = &self.status {
            frame.render_widget(
                Paragraph::new(Line::styled(status.as_str(), theme.error_style())),
                chunks[4],
            );
        }

        let keymap = ctx.keymap();
        let hints = format!(
            "Move: {} | {}",
            keymap.navigation_display(),
            keymap.hints(&[Action::Confirm, Action::Quit]),
        );
        Footer::render(frame, chunks[6], &hints, theme);
        Ok(())
    }
}
