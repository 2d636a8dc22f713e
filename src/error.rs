//! Domain error taxonomy.
//!
//! Application plumbing (terminal, config files, runtime) reports through
//! `anyhow`; the conditions screens have to react to are typed here.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecretlyError {
    /// The highlighted row has no matching secret (empty or stale table).
    #[error("no secret at cursor")]
    LookupFailed,

    /// The device login was rejected.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The device login was not completed in time.
    #[error("authentication timed out")]
    Timeout,

    /// The project snapshot could not be fetched.
    #[error("project unavailable: {0}")]
    Unavailable(String),

    /// The session is not allowed to read the project.
    #[error("not authorized to access this project")]
    Unauthorized,
}

impl SecretlyError {
    /// Whether the failure should end the login attempt and return to landing.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::AuthFailed(_) | Self::Timeout)
    }
}
