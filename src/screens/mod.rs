//! Screen controllers for the application.
//!
//! Each screen owns its state and handles both rendering and messages.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                      Router                            │
//! │  match active {                                        │
//! │    Landing => landing.handle_message(...)              │
//! │    Login   => login.handle_message(...)                │
//! │    Project => project.handle_message(...)              │
//! │  }                                                     │
//! │                                                        │
//! │  Screen trait                                          │
//! │  - init(context) -> ScreenAction                       │
//! │  - handle_message(message, context) -> ScreenAction    │
//! │  - render(frame, area, context)                        │
//! │  - is_input_focused() -> bool                          │
//! └────────────────────────────────────────────────────────┘
//! ```

pub mod landing;
pub mod login;
pub mod project;
pub mod screen_trait;

pub use landing::{LandingChoice, LandingScreen};
pub use login::LoginScreen;
pub use project::{ProjectScreen, ProjectView, SecretRow};
pub use screen_trait::{Message, RenderContext, Screen, ScreenAction, ScreenContext};
