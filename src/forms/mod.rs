//! Secret add/edit forms and the reconciliation they produce.

pub mod environment_selector;
pub mod reconcile;
pub mod secret_form;

pub use environment_selector::{Direction, EnvironmentRef, EnvironmentSelector, SelectionSet};
pub use reconcile::{reconcile, ReconcileInput, Reconciliation};
pub use secret_form::{FormEvent, FormStage, SecretForm, Submission};
