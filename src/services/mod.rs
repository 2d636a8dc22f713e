//! Application services layer.
//!
//! Services encapsulate the work that happens outside the UI: device-code
//! authentication, loading the project snapshot, and running the two as one
//! background sign-in task.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                   UI Layer                      │
//! │  (Router, Screens, Forms)                       │
//! └─────────────────────┬───────────────────────────┘
//!                       │ StartSignIn / TaskResult
//!                       ▼
//! ┌─────────────────────────────────────────────────┐
//! │               Services Layer                    │
//! │  ┌───────────────┐                              │
//! │  │ SignInService │──┬── AuthProvider            │
//! │  └───────────────┘  └── ProjectProvider         │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod project_provider;
pub mod sign_in_service;

pub use auth::{AuthProvider, DeviceCode, DeviceCodeAuth, Session};
pub use project_provider::{ProjectProvider, SnapshotProvider};
pub use sign_in_service::{SignInHandle, SignInResult, SignInService};
