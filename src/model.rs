//! Project snapshot types.
//!
//! A [`Project`] owns its environments and each [`Environment`] owns its
//! secrets. The snapshot is loaded once by a project provider and then
//! mutated in place by the project browser.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// A single secret placed in one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    /// Identifier assigned on creation, kept across edits
    pub id: String,
    pub name: String,
    pub value: String,
    pub project_id: String,
    pub environment_id: String,
}

impl Secret {
    /// Build a freshly identified secret scoped to one environment.
    pub fn build(name: &str, value: &str, project_id: &str, environment_id: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            value: value.to_string(),
            project_id: project_id.to_string(),
            environment_id: environment_id.to_string(),
        }
    }
}

/// A named partition of a project (e.g. "staging").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub id: String,
    pub name: String,
    pub project_id: String,
    #[serde(default)]
    pub secrets: Vec<Secret>,
}

impl Environment {
    /// Create an empty environment with a fresh identifier.
    pub fn new(name: &str, project_id: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            project_id: project_id.to_string(),
            secrets: Vec::new(),
        }
    }

    /// Check if a secret with `secret_id` is held here.
    pub fn contains(&self, secret_id: &str) -> bool {
        self.secrets.iter().any(|s| s.id == secret_id)
    }

    /// Find a secret by identifier.
    pub fn find(&self, secret_id: &str) -> Option<&Secret> {
        self.secrets.iter().find(|s| s.id == secret_id)
    }

    /// Remove every secret with `secret_id`. Returns true if anything was removed.
    pub fn remove(&mut self, secret_id: &str) -> bool {
        let len_before = self.secrets.len();
        self.secrets.retain(|s| s.id != secret_id);
        self.secrets.len() < len_before
    }

    /// Replace any secret with the same identifier, then append.
    pub fn upsert(&mut self, secret: Secret) {
        self.remove(&secret.id);
        self.secrets.push(secret);
    }
}

/// Top-level container of environments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub environments: Vec<Environment>,
}

impl Project {
    /// Create a project with empty environments named by `environment_names`.
    pub fn new(name: &str, environment_names: &[&str]) -> Self {
        let id = Uuid::new_v4().to_string();
        let environments = environment_names
            .iter()
            .map(|env_name| Environment::new(env_name, &id))
            .collect();
        Self {
            id,
            name: name.to_string(),
            environments,
        }
    }

    /// Demo project served when no snapshot file is configured.
    pub fn demo() -> Self {
        let mut project = Self::new("Demo Project", &["development", "staging", "production"]);
        let project_id = project.id.clone();
        let seed: [(&str, &str, &[usize]); 3] = [
            ("DATABASE_URL", "postgres://localhost:5432/app", &[0, 1]),
            ("API_KEY", "demo-api-key", &[0, 1, 2]),
            ("SENTRY_DSN", "https://public@sentry.example/1", &[2]),
        ];
        for (name, value, placements) in seed {
            let secret = Secret::build(name, value, &project_id, "");
            for &index in placements {
                let env = &mut project.environments[index];
                env.secrets.push(Secret {
                    environment_id: env.id.clone(),
                    ..secret.clone()
                });
            }
        }
        project
    }

    /// Check the ownership invariants of a loaded snapshot.
    ///
    /// Every environment and secret must point back at its parent, and no
    /// environment may hold the same secret identifier twice.
    pub fn validate(&self) -> Result<(), String> {
        for env in &self.environments {
            if env.project_id != self.id {
                return Err(format!(
                    "environment {} belongs to project {}, not {}",
                    env.name, env.project_id, self.id
                ));
            }
            let mut seen = HashSet::new();
            for secret in &env.secrets {
                if secret.project_id != self.id || secret.environment_id != env.id {
                    return Err(format!(
                        "secret {} in {} points at environment {}",
                        secret.name, env.name, secret.environment_id
                    ));
                }
                if !seen.insert(secret.id.as_str()) {
                    return Err(format!("duplicate secret id {} in {}", secret.id, env.name));
                }
            }
        }
        Ok(())
    }

    /// Look up an environment by identifier.
    pub fn environment(&self, environment_id: &str) -> Option<&Environment> {
        self.environments.iter().find(|e| e.id == environment_id)
    }

    /// Mutable lookup of an environment by identifier.
    pub fn environment_mut(&mut self, environment_id: &str) -> Option<&mut Environment> {
        self.environments.iter_mut().find(|e| e.id == environment_id)
    }

    /// Indices of every environment holding a secret with `secret_id`.
    pub fn placements(&self, secret_id: &str) -> Vec<usize> {
        self.environments
            .iter()
            .enumerate()
            .filter(|(_, env)| env.contains(secret_id))
            .map(|(i, _)| i)
            .collect()
    }

    /// Total number of secret placements across all environments.
    pub fn secret_count(&self) -> usize {
        self.environments.iter().map(|e| e.secrets.len()).sum()
    }
}
