//! Background sign-in: authenticate, then fetch the project.
//!
//! Runs on the tokio runtime so the event loop keeps drawing; the result is
//! handed back through a oneshot channel that the router polls every tick.

use crate::error::SecretlyError;
use crate::model::Project;
use crate::services::auth::{AuthProvider, DeviceCode};
use crate::services::project_provider::ProjectProvider;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub type SignInResult = Result<Project, SecretlyError>;

/// Handle for polling sign-in completion
pub struct SignInHandle {
    receiver: oneshot::Receiver<SignInResult>,
    task: JoinHandle<()>,
}

impl SignInHandle {
    /// Try to receive the result without blocking
    pub fn try_recv(&mut self) -> Option<SignInResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(SecretlyError::Unavailable(
                "sign-in task ended unexpectedly".to_string(),
            ))),
        }
    }

    /// Cancel the task. Blocking work already started runs to completion but
    /// its result is dropped.
    pub fn abort(&self) {
        self.task.abort();
    }
}

pub struct SignInService;

impl SignInService {
    /// Start signing in with `code`.
    ///
    /// Returns a `SignInHandle` that can be polled for the result.
    pub fn start(
        runtime: &Runtime,
        auth: Arc<dyn AuthProvider>,
        projects: Arc<dyn ProjectProvider>,
        code: DeviceCode,
    ) -> SignInHandle {
        let (sender, receiver) = oneshot::channel();

        let task = runtime.spawn(async move {
            let result = tokio::task::spawn_blocking(move || Self::sign_in(&*auth, &*projects, &code))
                .await
                .unwrap_or_else(|e| Err(SecretlyError::Unavailable(e.to_string())));
            let _ = sender.send(result);
        });

        SignInHandle { receiver, task }
    }

    fn sign_in(
        auth: &dyn AuthProvider,
        projects: &dyn ProjectProvider,
        code: &DeviceCode,
    ) -> SignInResult {
        let session = auth.complete(code).inspect_err(|e| {
            warn!("Device login {} failed: {}", code.user_code, e);
        })?;
        info!("Signed in, session issued at {}", session.issued_at);

        projects.fetch_project(&session).inspect_err(|e| {
            warn!("Project fetch failed: {}", e);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::{DeviceCodeAuth, Session};
    use crate::services::project_provider::SnapshotProvider;
    use chrono::Duration;
    use std::time::{Duration as StdDuration, Instant};

    fn wait(handle: &mut SignInHandle) -> SignInResult {
        let deadline = Instant::now() + StdDuration::from_secs(5);
        loop {
            if let Some(result) = handle.try_recv() {
                return result;
            }
            assert!(Instant::now() < deadline, "sign-in never finished");
            std::thread::sleep(StdDuration::from_millis(5));
        }
    }

    struct Refusing;

    impl ProjectProvider for Refusing {
        fn fetch_project(&self, _session: &Session) -> Result<Project, SecretlyError> {
            Err(SecretlyError::Unauthorized)
        }
    }

    #[test]
    fn test_sign_in_delivers_project() {
        let runtime = Runtime::new().unwrap();
        let auth = Arc::new(DeviceCodeAuth::new());
        let code = auth.start_device_flow();
        let mut handle =
            SignInService::start(&runtime, auth, Arc::new(SnapshotProvider::default()), code);

        let project = wait(&mut handle).unwrap();
        assert_eq!(project.name, "Demo Project");
    }

    #[test]
    fn test_auth_error_skips_fetch() {
        let runtime = Runtime::new().unwrap();
        let auth = Arc::new(DeviceCodeAuth::with_ttl(Duration::seconds(-1)));
        let code = auth.start_device_flow();
        let mut handle = SignInService::start(&runtime, auth, Arc::new(Refusing), code);

        assert_eq!(wait(&mut handle), Err(SecretlyError::Timeout));
    }

    #[test]
    fn test_fetch_error_is_reported() {
        let runtime = Runtime::new().unwrap();
        let auth = Arc::new(DeviceCodeAuth::new());
        let code = auth.start_device_flow();
        let mut handle = SignInService::start(&runtime, auth, Arc::new(Refusing), code);

        assert_eq!(wait(&mut handle), Err(SecretlyError::Unauthorized));
    }
}
