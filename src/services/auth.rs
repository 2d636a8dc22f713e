//! Device-code authentication.
//!
//! The user opens the verification URL in a browser, approves the code, then
//! presses Enter in the terminal; [`AuthProvider::complete`] turns that
//! acknowledgement into a [`Session`].

use crate::error::SecretlyError;
use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};
use uuid::Uuid;

/// Where users approve device codes.
pub const DEVICE_URL: &str = "https://secretly.kitto.sh/device";

/// How long a device code stays valid.
pub const DEFAULT_CODE_TTL_MINUTES: i64 = 15;

/// A pending device login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceCode {
    /// Short code shown to the user, e.g. `K7QF-2MXD`
    pub user_code: String,
    pub expires_at: DateTime<Utc>,
}

impl DeviceCode {
    /// URL the user opens to approve this code.
    pub fn verification_url(&self) -> String {
        format!("{}?code={}", DEVICE_URL, self.user_code)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub issued_at: DateTime<Utc>,
}

/// Source of sessions. Calls may block; the router runs them off the UI thread.
pub trait AuthProvider: Send + Sync {
    fn start_device_flow(&self) -> DeviceCode;

    /// Finish the login started by `start_device_flow`.
    ///
    /// Fails with `AuthFailed` if the code was rejected and `Timeout` if it
    /// expired first.
    fn complete(&self, code: &DeviceCode) -> Result<Session, SecretlyError>;
}

/// Device-code flow acknowledged by the user pressing Enter.
#[derive(Debug, Clone)]
pub struct DeviceCodeAuth {
    ttl: Duration,
}

impl Default for DeviceCodeAuth {
    fn default() -> Self {
        Self {
            ttl: Duration::minutes(DEFAULT_CODE_TTL_MINUTES),
        }
    }
}

impl DeviceCodeAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl }
    }
}

impl AuthProvider for DeviceCodeAuth {
    fn start_device_flow(&self) -> DeviceCode {
        let code = DeviceCode {
            user_code: generate_user_code(),
            expires_at: Utc::now() + self.ttl,
        };
        info!("Started device login with code {}", code.user_code);
        code
    }

    fn complete(&self, code: &DeviceCode) -> Result<Session, SecretlyError> {
        if !is_well_formed(&code.user_code) {
            return Err(SecretlyError::AuthFailed(format!(
                "invalid device code '{}'",
                code.user_code
            )));
        }
        let now = Utc::now();
        if code.is_expired(now) {
            warn!("Device code {} expired at {}", code.user_code, code.expires_at);
            return Err(SecretlyError::Timeout);
        }
        Ok(Session {
            token: Uuid::new_v4().simple().to_string(),
            issued_at: now,
        })
    }
}

/// Two groups of four uppercase alphanumerics.
fn generate_user_code() -> String {
    let raw = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("{}-{}", &raw[..4], &raw[4..8])
}

fn is_well_formed(user_code: &str) -> bool {
    match user_code.split_once('-') {
        Some((left, right)) => [left, right]
            .iter()
            .all(|part| part.len() == 4 && part.chars().all(|c| c.is_ascii_alphanumeric())),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_code_shape() {
        let code = DeviceCodeAuth::new().start_device_flow();
        assert!(is_well_formed(&code.user_code));
        assert!(code.verification_url().ends_with(&code.user_code));
    }

    #[test]
    fn test_complete_issues_session() {
        let auth = DeviceCodeAuth::new();
        let code = auth.start_device_flow();
        let session = auth.complete(&code).unwrap();
        assert!(!session.token.is_empty());
    }

    #[test]
    fn test_expired_code_times_out() {
        let auth = DeviceCodeAuth::with_ttl(Duration::seconds(-1));
        let code = auth.start_device_flow();
        assert_eq!(auth.complete(&code), Err(SecretlyError::Timeout));
    }

    #[test]
    fn test_malformed_code_rejected() {
        let auth = DeviceCodeAuth::new();
        let code = DeviceCode {
            user_code: "nope".to_string(),
            expires_at: Utc::now() + Duration::minutes(1),
        };
        assert!(matches!(auth.complete(&code), Err(SecretlyError::AuthFailed(_))));
    }
}
