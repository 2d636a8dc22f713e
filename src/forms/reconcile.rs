//! Turning a submitted secret form into project mutations.

use crate::forms::environment_selector::{EnvironmentRef, SelectionSet};
use crate::model::{Project, Secret};

/// Everything a submitted form asks the project to change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// One secret per environment in the current selection
    pub secrets: Vec<Secret>,
    /// Environments selected now but not at form-open time
    pub added: Vec<EnvironmentRef>,
    /// Environments selected at form-open time but not now
    pub removed: Vec<EnvironmentRef>,
    /// Identifier of the edited secret, if any
    pub original_id: Option<String>,
}

/// Inputs to [`reconcile`], as captured from a submitted form.
#[derive(Debug, Clone, Copy)]
pub struct ReconcileInput<'a> {
    pub project_id: &'a str,
    pub name: &'a str,
    pub value: &'a str,
    pub choices: &'a [EnvironmentRef],
    pub selected: &'a SelectionSet,
    pub baseline: &'a SelectionSet,
    pub original: Option<&'a Secret>,
}

/// Diff the current selection against the baseline and build the secrets.
///
/// Every resulting secret carries one identifier: the original's in edit
/// mode, a single freshly minted one in add mode. The placements of a secret
/// are therefore the environments holding that identifier.
pub fn reconcile(input: ReconcileInput<'_>) -> Reconciliation {
    let template = input.original.cloned().unwrap_or_else(|| {
        Secret::build(input.name, input.value, input.project_id, "")
    });
    let secrets = input
        .selected
        .iter()
        .filter_map(|&i| input.choices.get(i))
        .map(|env| Secret {
            name: input.name.to_string(),
            value: input.value.to_string(),
            environment_id: env.id.clone(),
            ..template.clone()
        })
        .collect();

    Reconciliation {
        secrets,
        added: pick(input.choices, input.selected.difference(input.baseline)),
        removed: pick(input.choices, input.baseline.difference(input.selected)),
        original_id: input.original.map(|s| s.id.clone()),
    }
}

fn pick<'a>(
    choices: &[EnvironmentRef],
    indices: impl Iterator<Item = &'a usize>,
) -> Vec<EnvironmentRef> {
    indices.filter_map(|&i| choices.get(i)).cloned().collect()
}

impl Reconciliation {
    /// Apply the mutations to `project`.
    ///
    /// Removed environments drop the original identifier; every resulting
    /// secret replaces any secret with the same identifier in its target
    /// environment and is appended there. Applying twice equals applying once.
    pub fn apply(&self, project: &mut Project) {
        if let Some(original_id) = &self.original_id {
            for env in &self.removed {
                if let Some(environment) = project.environment_mut(&env.id) {
                    environment.remove(original_id);
                }
            }
        }

        for secret in &self.secrets {
            if let Some(environment) = project.environment_mut(&secret.environment_id) {
                environment.upsert(secret.clone());
            }
        }
    }

    /// Secret name carried by the result, for status messages.
    pub fn secret_name(&self) -> Option<&str> {
        self.secrets.first().map(|s| s.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input<'a>(
        project: &'a Project,
        choices: &'a [EnvironmentRef],
        selected: &'a SelectionSet,
        baseline: &'a SelectionSet,
        original: Option<&'a Secret>,
    ) -> ReconcileInput<'a> {
        ReconcileInput {
            project_id: &project.id,
            name: "API_KEY",
            value: "xyz",
            choices,
            selected,
            baseline,
            original,
        }
    }

    #[test]
    fn test_add_mode_shares_one_minted_id() {
        let project = Project::new("p", &["dev", "staging", "prod"]);
        let choices = EnvironmentRef::capture(&project.environments);
        let selected: SelectionSet = [0, 2].into_iter().collect();
        let baseline = SelectionSet::new();

        let result = reconcile(input(&project, &choices, &selected, &baseline, None));

        assert_eq!(result.secrets.len(), 2);
        assert_eq!(result.secrets[0].id, result.secrets[1].id);
        assert!(result.secrets.iter().all(|s| s.project_id == project.id));
        assert_eq!(result.secrets[0].environment_id, project.environments[0].id);
        assert_eq!(result.secrets[1].environment_id, project.environments[2].id);
        assert_eq!(result.added.len(), 2);
        assert!(result.removed.is_empty());
        assert_eq!(result.original_id, None);
    }

    #[test]
    fn test_edit_mode_shares_original_id() {
        let project = Project::new("p", &["dev", "staging", "prod"]);
        let choices = EnvironmentRef::capture(&project.environments);
        let original = Secret::build("API_KEY", "old", &project.id, &project.environments[0].id);
        let selected: SelectionSet = [0, 1].into_iter().collect();
        let baseline: SelectionSet = [0, 2].into_iter().collect();

        let result = reconcile(input(
            &project,
            &choices,
            &selected,
            &baseline,
            Some(&original),
        ));

        assert!(result.secrets.iter().all(|s| s.id == original.id));
        assert!(result.secrets.iter().all(|s| s.value == "xyz"));
        assert_eq!(
            result.added.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
            vec!["staging"]
        );
        assert_eq!(
            result.removed.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
            vec!["prod"]
        );
    }

    #[test]
    fn test_added_and_removed_partition_the_change() {
        let project = Project::new("p", &["a", "b", "c", "d", "e"]);
        let choices = EnvironmentRef::capture(&project.environments);
        let original = Secret::build("K", "v", &project.id, &project.environments[0].id);
        let cases: [(&[usize], &[usize]); 4] = [
            (&[], &[]),
            (&[0, 1, 2], &[2, 3]),
            (&[4], &[0, 1, 2, 3, 4]),
            (&[0, 2, 4], &[1, 3]),
        ];
        for (current, base) in cases {
            let selected: SelectionSet = current.iter().copied().collect();
            let baseline: SelectionSet = base.iter().copied().collect();
            let result = reconcile(input(
                &project,
                &choices,
                &selected,
                &baseline,
                Some(&original),
            ));
            let added: SelectionSet = result.added.iter().map(|e| e.index).collect();
            let removed: SelectionSet = result.removed.iter().map(|e| e.index).collect();

            assert!(added.is_disjoint(&removed));
            assert_eq!(added, selected.difference(&baseline).copied().collect());
            assert_eq!(removed, baseline.difference(&selected).copied().collect());
        }
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut project = Project::new("p", &["dev", "staging", "prod"]);
        let original = Secret::build("API_KEY", "old", &project.id, &project.environments[2].id);
        project.environments[2].secrets.push(original.clone());
        let choices = EnvironmentRef::capture(&project.environments);
        let selected: SelectionSet = [0, 1].into_iter().collect();
        let baseline: SelectionSet = [2].into_iter().collect();

        let result = reconcile(input(
            &project,
            &choices,
            &selected,
            &baseline,
            Some(&original),
        ));
        result.apply(&mut project);
        let once = project.clone();
        result.apply(&mut project);

        assert_eq!(project, once);
        assert!(project.environments[2].secrets.is_empty());
        assert_eq!(project.placements(&original.id), vec![0, 1]);
    }

    #[test]
    fn test_apply_add_twice_does_not_duplicate() {
        let mut project = Project::new("p", &["dev"]);
        let choices = EnvironmentRef::capture(&project.environments);
        let selected: SelectionSet = [0].into_iter().collect();
        let baseline = SelectionSet::new();

        let result = reconcile(input(&project, &choices, &selected, &baseline, None));
        result.apply(&mut project);
        result.apply(&mut project);

        assert_eq!(project.environments[0].secrets.len(), 1);
    }
}
