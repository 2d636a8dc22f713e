//! Device code login screen.

use crate::components::Footer;
use crate::keymap::Action;
use crate::screens::screen_trait::{Message, RenderContext, Screen, ScreenAction, ScreenContext};
use crate::services::DeviceCode;
use crate::widgets::Spinner;
use anyhow::Result;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;
use tracing::{info, warn};

#[derive(Debug)]
pub struct LoginScreen {
    code: DeviceCode,
    spinner: Spinner,
    /// A sign-in task is running
    in_flight: bool,
    status: Option<String>,
}

impl LoginScreen {
    pub fn new(code: DeviceCode) -> Self {
        Self {
            code,
            spinner: Spinner::new(),
            in_flight: false,
            status: None,
        }
    }

    pub fn device_code(&self) -> &DeviceCode {
        &self.code
    }

    pub fn is_signing_in(&self) -> bool {
        self.in_flight
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn handle_action(&mut self, action: Option<Action>) -> ScreenAction {
        match action {
            Some(Action::Quit) | Some(Action::Cancel) => return ScreenAction::Exit,
            Some(Action::Confirm) if !self.in_flight => {}
            _ => return ScreenAction::None,
        }
        self.in_flight = true;
        self.status = Some("Finishing sign-in...".to_string());
        ScreenAction::StartSignIn(self.code.clone())
    }
}

impl Screen for LoginScreen {
    fn init(&mut self, _ctx: &ScreenContext) -> ScreenAction {
        self.spinner.start();
        ScreenAction::None
    }

    fn handle_message(&mut self, message: Message, ctx: &ScreenContext) -> Result<ScreenAction> {
        Ok(match message {
            Message::Key(key) => self.handle_action(ctx.keymap().action_for(&key)),
            Message::Tick => {
                self.spinner.tick();
                ScreenAction::None
            }
            Message::TaskResult(Ok(project)) => {
                self.in_flight = false;
                info!("Sign-in complete, opening project '{}'", project.name);
                ScreenAction::SwitchToProject(Box::new(project))
            }
            Message::TaskResult(Err(e)) => {
                self.in_flight = false;
                if e.is_auth_failure() {
                    warn!("Login abandoned: {}", e);
                    ScreenAction::ReturnToLanding {
                        message: e.to_string(),
                    }
                } else {
                    warn!("Sign-in failed, retry possible: {}", e);
                    self.status = Some(format!("{}. Press Enter to retry.", e));
                    ScreenAction::None
                }
            }
            Message::SwitchToLogin | Message::SwitchToProject(_) | Message::Exit => {
                ScreenAction::None
            }
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let theme = ctx.theme;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(2)])
            .split(area);

        let waiting = if self.in_flight {
            "Signing in..."
        } else {
            "Waiting for authentication..."
        };

        let mut lines = vec![
            Line::default(),
            Line::styled("Device Code Login", theme.title_style()),
            Line::default(),
            Line::styled(
                " 1. Open the following URL in your web browser",
                theme.text_style(),
            ),
            Line::default(),
            Line::from(vec![
                Span::styled("       >  ", theme.muted_style()),
                Span::styled(self.code.verification_url(), theme.emphasis_style()),
            ]),
            Line::default(),
            Line::styled(
                " 2. Follow the instructions on the webpage to complete the authentication process.",
                theme.text_style(),
            ),
            Line::default(),
            Line::styled(
                " 3. After completing the authentication, press Enter here to finalize the login process.",
                theme.text_style(),
            ),
            Line::default(),
            Line::from(vec![
                self.spinner.span(theme),
                Span::styled(format!("  {}", waiting), theme.text_style()),
            ]),
        ];
        if let Some(status) = &self.status {
            lines.push(Line::default());
            lines.push(Line::styled(status.as_str(), theme.error_style()));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), chunks[0]);
        let keymap = ctx.keymap();
        let hints = format!(
            "Sign in: {} | {}",
            keymap.get_key_display_for_action(Action::Confirm),
            keymap.hint(Action::Quit),
        );
        Footer::render(frame, chunks[1], &hints, theme);
        Ok(())
    }
}
