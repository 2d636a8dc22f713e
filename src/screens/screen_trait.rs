//! Screen trait and associated types.
//!
//! Screens own their state, receive every input as a [`Message`] and answer
//! with a [`ScreenAction`] instead of reaching into the router. Context
//! objects give read-only access to shared resources.

use crate::config::Config;
use crate::error::SecretlyError;
use crate::keymap::Keymap;
use crate::model::Project;
use crate::services::DeviceCode;
use crate::styles::Theme;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::Frame;

/// Context provided for rendering screens.
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    pub config: &'a Config,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a Theme, config: &'a Config) -> Self {
        Self { theme, config }
    }

    pub fn keymap(&self) -> &'a Keymap {
        &self.config.keymap
    }
}

/// Context provided for handling messages.
pub struct ScreenContext<'a> {
    pub config: &'a Config,
}

impl<'a> ScreenContext<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn keymap(&self) -> &'a Keymap {
        &self.config.keymap
    }
}

/// Everything the router feeds through the event loop.
#[derive(Debug)]
pub enum Message {
    /// A key press
    Key(KeyEvent),
    /// Periodic tick driving spinners and task polling
    Tick,
    SwitchToLogin,
    /// Sign-in finished and produced this project
    SwitchToProject(Box<Project>),
    Exit,
    /// A background task finished
    TaskResult(Result<Project, SecretlyError>),
}

/// Actions that a screen can return after handling a message.
#[derive(Debug, Default)]
pub enum ScreenAction {
    /// Stay on the current screen.
    #[default]
    None,
    SwitchToLogin,
    SwitchToProject(Box<Project>),
    /// Abandon the current flow and show `message` on the landing screen.
    ReturnToLanding { message: String },
    /// Start the background sign-in for this device code.
    StartSignIn(DeviceCode),
    Exit,
}

/// Trait for screen controllers.
///
/// # Example
///
/// ```rust,ignore
/// struct MyScreen;
///
/// impl Screen for MyScreen {
///     fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
///         Ok(())
///     }
///
///     fn handle_message(&mut self, message: Message, ctx: &ScreenContext) -> Result<ScreenAction> {
///         match message {
///             Message::Key(_) => Ok(ScreenAction::Exit),
///             _ => Ok(ScreenAction::None),
///         }
///     }
/// }
/// ```
pub trait Screen {
    /// Called once when the screen becomes active.
    fn init(&mut self, _ctx: &ScreenContext) -> ScreenAction {
        ScreenAction::None
    }

    /// Handle one routed message.
    fn handle_message(&mut self, message: Message, ctx: &ScreenContext) -> Result<ScreenAction>;

    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()>;

    /// When true, printable shortcuts are typed instead of triggering actions.
    fn is_input_focused(&self) -> bool {
        false
    }
}
