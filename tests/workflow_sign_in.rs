//! Landing to project through the router, with the sign-in task running on
//! the background runtime.

mod common;

use common::key;
use crossterm::event::KeyCode;
use secretly::app::{ActiveScreen, Router};
use secretly::config::Config;
use secretly::model::Project;
use secretly::screens::Message;
use secretly::services::{
    AuthProvider, DeviceCode, DeviceCodeAuth, ProjectProvider, Session, SnapshotProvider,
};
use secretly::SecretlyError;
use std::sync::Arc;
use std::time::Duration;

/// Tick the router until the sign-in task has reported back.
fn wait_for_sign_in(router: &mut Router) {
    for _ in 0..500 {
        router.update(Message::Tick).unwrap();
        if !router.is_busy() {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("sign-in never finished");
}

fn router_with(auth: Arc<dyn AuthProvider>, projects: Arc<dyn ProjectProvider>) -> Router {
    let mut router = Router::new(Config::default(), auth, projects).unwrap();
    router.init().unwrap();
    router
}

#[test]
fn test_landing_login_project() {
    let mut router = router_with(
        Arc::new(DeviceCodeAuth::new()),
        Arc::new(SnapshotProvider::default()),
    );
    assert_eq!(router.active().name(), "landing");

    router.update(Message::Key(key(KeyCode::Enter))).unwrap();
    assert_eq!(router.active().name(), "login");

    router.update(Message::Key(key(KeyCode::Enter))).unwrap();
    assert!(router.is_busy());
    wait_for_sign_in(&mut router);

    match router.active() {
        ActiveScreen::Project(screen) => {
            assert_eq!(screen.project().name, "Demo Project");
            assert_eq!(screen.rows().len(), 6);
        }
        other => panic!("expected project screen, got {}", other.name()),
    }
}

#[test]
fn test_expired_code_returns_to_landing() {
    let mut router = router_with(
        Arc::new(DeviceCodeAuth::with_ttl(chrono::Duration::zero())),
        Arc::new(SnapshotProvider::default()),
    );
    router.update(Message::SwitchToLogin).unwrap();
    router.update(Message::Key(key(KeyCode::Enter))).unwrap();
    wait_for_sign_in(&mut router);

    match router.active() {
        ActiveScreen::Landing(screen) => {
            assert_eq!(screen.status(), Some("authentication timed out"));
        }
        other => panic!("expected landing screen, got {}", other.name()),
    }
}

/// Fails the first fetch, then serves an empty project.
struct FlakyProjects {
    failed: std::sync::atomic::AtomicBool,
}

impl ProjectProvider for FlakyProjects {
    fn fetch_project(&self, _session: &Session) -> Result<Project, SecretlyError> {
        if !self.failed.swap(true, std::sync::atomic::Ordering::SeqCst) {
            return Err(SecretlyError::Unavailable("service offline".to_string()));
        }
        Ok(Project::new("Recovered", &["dev"]))
    }
}

#[test]
fn test_unavailable_project_can_be_retried() {
    let mut router = router_with(
        Arc::new(DeviceCodeAuth::new()),
        Arc::new(FlakyProjects {
            failed: std::sync::atomic::AtomicBool::new(false),
        }),
    );
    router.update(Message::SwitchToLogin).unwrap();

    router.update(Message::Key(key(KeyCode::Enter))).unwrap();
    wait_for_sign_in(&mut router);
    match router.active() {
        ActiveScreen::Login(screen) => {
            assert!(screen.status().unwrap_or_default().contains("service offline"));
        }
        other => panic!("expected login screen, got {}", other.name()),
    }

    router.update(Message::Key(key(KeyCode::Enter))).unwrap();
    wait_for_sign_in(&mut router);
    assert_eq!(router.active().name(), "project");
}

/// Rejects every code.
struct RejectingAuth;

impl AuthProvider for RejectingAuth {
    fn start_device_flow(&self) -> DeviceCode {
        DeviceCode {
            user_code: "ABCD-1234".to_string(),
            expires_at: chrono::Utc::now() + chrono::Duration::minutes(5),
        }
    }

    fn complete(&self, code: &DeviceCode) -> Result<Session, SecretlyError> {
        Err(SecretlyError::AuthFailed(format!("{} was denied", code.user_code)))
    }
}

#[test]
fn test_rejected_code_returns_to_landing_with_reason() {
    let mut router = router_with(Arc::new(RejectingAuth), Arc::new(SnapshotProvider::default()));
    router.update(Message::SwitchToLogin).unwrap();
    router.update(Message::Key(key(KeyCode::Enter))).unwrap();
    wait_for_sign_in(&mut router);

    match router.active() {
        ActiveScreen::Landing(screen) => {
            assert!(screen.status().unwrap_or_default().contains("ABCD-1234 was denied"));
        }
        other => panic!("expected landing screen, got {}", other.name()),
    }
}

#[test]
fn test_quit_from_login_cancels_sign_in() {
    let mut router = router_with(
        Arc::new(DeviceCodeAuth::new()),
        Arc::new(SnapshotProvider::default()),
    );
    router.update(Message::SwitchToLogin).unwrap();
    router.update(Message::Key(key(KeyCode::Enter))).unwrap();
    router.update(Message::Key(key(KeyCode::Esc))).unwrap();
    assert!(router.should_quit());
    assert!(!router.is_busy());
}
