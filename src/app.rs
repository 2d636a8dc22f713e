//! Screen router and the terminal event loop.
//!
//! [`Router`] holds the active screen and turns [`Message`]s into screen
//! transitions; it never touches the terminal, so it can be driven directly
//! in tests. [`App`] owns the terminal and feeds the router key presses and
//! ticks.

use crate::config::Config;
use crate::screens::{
    LandingScreen, LoginScreen, Message, ProjectScreen, RenderContext, Screen, ScreenAction,
    ScreenContext,
};
use crate::services::{
    AuthProvider, DeviceCodeAuth, ProjectProvider, SignInHandle, SignInService, SnapshotProvider,
};
use crate::styles::Theme;
use crate::tui::Tui;
use anyhow::{Context, Result};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use tracing::{debug, info};

/// The top-level screen currently receiving input.
#[derive(Debug)]
pub enum ActiveScreen {
    Landing(LandingScreen),
    Login(LoginScreen),
    Project(ProjectScreen),
}

impl ActiveScreen {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Landing(_) => "landing",
            Self::Login(_) => "login",
            Self::Project(_) => "project",
        }
    }

    fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::Landing(screen) => screen,
            Self::Login(screen) => screen,
            Self::Project(screen) => screen,
        }
    }
}

/// Ctrl+C always quits, whatever the screen or keymap.
fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

pub struct Router {
    config: Config,
    theme: Theme,
    active: ActiveScreen,
    auth: Arc<dyn AuthProvider>,
    projects: Arc<dyn ProjectProvider>,
    runtime: Runtime,
    sign_in: Option<SignInHandle>,
    should_quit: bool,
}

impl Router {
    pub fn new(
        config: Config,
        auth: Arc<dyn AuthProvider>,
        projects: Arc<dyn ProjectProvider>,
    ) -> Result<Self> {
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        Ok(Self {
            theme: Theme::new(config.theme),
            config,
            active: ActiveScreen::Landing(LandingScreen::new()),
            auth,
            projects,
            runtime,
            sign_in: None,
            should_quit: false,
        })
    }

    pub fn active(&self) -> &ActiveScreen {
        &self.active
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Whether a sign-in task is outstanding.
    pub fn is_busy(&self) -> bool {
        self.sign_in.is_some()
    }

    /// Run the active screen's init hook.
    pub fn init(&mut self) -> Result<()> {
        let ctx = ScreenContext::new(&self.config);
        let action = self.active.as_screen_mut().init(&ctx);
        self.apply(action)
    }

    /// Process one message to completion.
    pub fn update(&mut self, message: Message) -> Result<()> {
        match message {
            Message::SwitchToLogin => {
                let code = self.auth.start_device_flow();
                self.activate(ActiveScreen::Login(LoginScreen::new(code)))
            }
            Message::SwitchToProject(project) => {
                self.activate(ActiveScreen::Project(ProjectScreen::new(*project)))
            }
            Message::Exit => {
                self.quit();
                Ok(())
            }
            Message::Key(key) if is_interrupt(&key) => self.update(Message::Exit),
            Message::Tick => {
                self.poll_sign_in()?;
                self.forward(Message::Tick)
            }
            Message::Key(_) | Message::TaskResult(_) => self.forward(message),
        }
    }

    pub fn render(&mut self, frame: &mut Frame) -> Result<()> {
        let ctx = RenderContext::new(&self.theme, &self.config);
        let area = frame.area();
        self.active.as_screen_mut().render(frame, area, &ctx)
    }

    fn forward(&mut self, message: Message) -> Result<()> {
        let name = self.active.name();
        let screen = self.active.as_screen_mut();
        if let Message::Key(key) = &message {
            debug!(
                "Routing {:?} to {} screen (typing: {})",
                key.code,
                name,
                screen.is_input_focused()
            );
        }
        let ctx = ScreenContext::new(&self.config);
        let action = screen.handle_message(message, &ctx)?;
        self.apply(action)
    }

    fn apply(&mut self, action: ScreenAction) -> Result<()> {
        match action {
            ScreenAction::None => Ok(()),
            ScreenAction::SwitchToLogin => self.update(Message::SwitchToLogin),
            ScreenAction::SwitchToProject(project) => {
                self.update(Message::SwitchToProject(project))
            }
            ScreenAction::ReturnToLanding { message } => {
                self.cancel_sign_in();
                self.activate(ActiveScreen::Landing(LandingScreen::with_status(message)))
            }
            ScreenAction::StartSignIn(code) => {
                self.cancel_sign_in();
                info!("Starting sign-in for device code {}", code.user_code);
                self.sign_in = Some(SignInService::start(
                    &self.runtime,
                    Arc::clone(&self.auth),
                    Arc::clone(&self.projects),
                    code,
                ));
                Ok(())
            }
            ScreenAction::Exit => self.update(Message::Exit),
        }
    }

    fn activate(&mut self, screen: ActiveScreen) -> Result<()> {
        info!("Switching from {} to {} screen", self.active.name(), screen.name());
        self.active = screen;
        self.init()
    }

    fn poll_sign_in(&mut self) -> Result<()> {
        let Some(result) = self.sign_in.as_mut().and_then(SignInHandle::try_recv) else {
            return Ok(());
        };
        self.sign_in = None;
        self.forward(Message::TaskResult(result))
    }

    fn cancel_sign_in(&mut self) {
        if let Some(handle) = self.sign_in.take() {
            debug!("Aborting outstanding sign-in");
            handle.abort();
        }
    }

    fn quit(&mut self) {
        info!("Exiting");
        self.cancel_sign_in();
        self.should_quit = true;
    }
}

/// Main application: the terminal plus the router it drives.
pub struct App {
    router: Router,
    tui: Tui,
    tick_rate: Duration,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let tick_rate = Duration::from_millis(config.tick_rate_ms);
        let auth: Arc<dyn AuthProvider> = Arc::new(DeviceCodeAuth::new());
        let projects: Arc<dyn ProjectProvider> =
            Arc::new(SnapshotProvider::new(config.project_file.clone()));
        Ok(Self {
            router: Router::new(config, auth, projects)?,
            tui: Tui::new()?,
            tick_rate,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.tui.enter()?;
        let result = self.event_loop();
        self.tui.exit()?;
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        self.router.init()?;
        let mut last_tick = Instant::now();

        loop {
            let router = &mut self.router;
            let mut rendered = Ok(());
            self.tui.terminal_mut().draw(|frame| {
                rendered = router.render(frame);
            })?;
            rendered?;

            if self.router.should_quit() {
                break;
            }

            let timeout = self.tick_rate.saturating_sub(last_tick.elapsed());
            if let Some(Event::Key(key)) = self.tui.poll_event(timeout)? {
                if key.kind == KeyEventKind::Press {
                    self.router.update(Message::Key(key))?;
                }
            }

            if last_tick.elapsed() >= self.tick_rate {
                self.router.update(Message::Tick)?;
                last_tick = Instant::now();
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> Router {
        Router::new(
            Config::default(),
            Arc::new(DeviceCodeAuth::new()),
            Arc::new(SnapshotProvider::default()),
        )
        .unwrap()
    }

    fn key(code: KeyCode) -> Message {
        Message::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_starts_on_landing() {
        let router = router();
        assert_eq!(router.active().name(), "landing");
        assert!(!router.should_quit());
    }

    #[test]
    fn test_ctrl_c_exits_from_any_screen() {
        let mut router = router();
        router.update(key(KeyCode::Enter)).unwrap();
        assert_eq!(router.active().name(), "login");
        router
            .update(Message::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            )))
            .unwrap();
        assert!(router.should_quit());
    }

    #[test]
    fn test_switch_to_project_message() {
        let mut router = router();
        router
            .update(Message::SwitchToProject(Box::new(crate::model::Project::demo())))
            .unwrap();
        assert_eq!(router.active().name(), "project");
    }

    #[test]
    fn test_quit_aborts_outstanding_sign_in() {
        let mut router = router();
        router.update(Message::SwitchToLogin).unwrap();
        router.update(key(KeyCode::Enter)).unwrap();
        assert!(router.is_busy());
        router.update(key(KeyCode::Char('q'))).unwrap();
        assert!(router.should_quit());
        assert!(!router.is_busy());
    }
}
