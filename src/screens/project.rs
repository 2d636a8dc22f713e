//! Project browser: every secret of every environment in one table, plus the
//! add and edit forms.

use crate::components::Footer;
use crate::error::SecretlyError;
use crate::forms::{EnvironmentRef, FormEvent, Reconciliation, SecretForm, SelectionSet};
use crate::keymap::{Action, Keymap};
use crate::model::{Project, Secret};
use crate::screens::screen_trait::{Message, RenderContext, Screen, ScreenAction, ScreenContext};
use crate::styles::LIST_HIGHLIGHT_SYMBOL;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState};
use ratatui::Frame;
use tracing::{debug, info};

/// What the browser is currently showing.
#[derive(Debug)]
pub enum ProjectView {
    Browsing,
    AddSecret(SecretForm),
    UpdateSecret(SecretForm),
}

/// One table row: a secret placed in an environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretRow {
    pub secret_id: String,
    pub secret_name: String,
    pub environment_id: String,
    pub environment_name: String,
}

#[derive(Debug)]
pub struct ProjectScreen {
    project: Project,
    rows: Vec<SecretRow>,
    table_state: TableState,
    table_focused: bool,
    view: ProjectView,
    status: Option<String>,
}

impl ProjectScreen {
    pub fn new(project: Project) -> Self {
        let mut screen = Self {
            project,
            rows: Vec::new(),
            table_state: TableState::default(),
            table_focused: true,
            view: ProjectView::Browsing,
            status: None,
        };
        screen.rebuild_rows();
        screen
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn rows(&self) -> &[SecretRow] {
        &self.rows
    }

    pub fn view(&self) -> &ProjectView {
        &self.view
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_table_focused(&self) -> bool {
        self.table_focused
    }

    pub fn cursor(&self) -> Option<usize> {
        self.table_state.selected()
    }

    /// Flatten (environment, secret) pairs in environment then secret order.
    ///
    /// Keeps the cursor on the same index, clamped to the new row count.
    pub fn rebuild_rows(&mut self) {
        self.rows = self
            .project
            .environments
            .iter()
            .flat_map(|env| {
                env.secrets.iter().map(move |secret| SecretRow {
                    secret_id: secret.id.clone(),
                    secret_name: secret.name.clone(),
                    environment_id: env.id.clone(),
                    environment_name: env.name.clone(),
                })
            })
            .collect();

        let selected = match (self.rows.len(), self.table_state.selected()) {
            (0, _) => None,
            (len, Some(i)) => Some(i.min(len - 1)),
            (_, None) => Some(0),
        };
        self.table_state.select(selected);
    }

    /// Select a row, clamped to the table.
    pub fn select_row(&mut self, index: usize) {
        if !self.rows.is_empty() {
            self.table_state.select(Some(index.min(self.rows.len() - 1)));
        }
    }

    fn row_at_cursor(&self) -> Result<&SecretRow, SecretlyError> {
        self.table_state
            .selected()
            .and_then(|i| self.rows.get(i))
            .ok_or(SecretlyError::LookupFailed)
    }

    /// The secret under the table cursor.
    pub fn secret_at_cursor(&self) -> Result<Secret, SecretlyError> {
        let row = self.row_at_cursor()?;
        self.project
            .environment(&row.environment_id)
            .and_then(|env| env.find(&row.secret_id))
            .cloned()
            .ok_or(SecretlyError::LookupFailed)
    }

    /// Open a blank add form.
    pub fn begin_add(&mut self) {
        debug!("Opening add form");
        self.view = ProjectView::AddSecret(SecretForm::new_add(&self.project));
    }

    /// Open the edit form for the secret under the cursor.
    pub fn begin_edit(&mut self) -> Result<(), SecretlyError> {
        let secret = self.secret_at_cursor()?;
        let baseline: SelectionSet = self.project.placements(&secret.id).into_iter().collect();
        debug!("Opening edit form for {} in {:?}", secret.name, baseline);
        self.view = ProjectView::UpdateSecret(SecretForm::new_edit(&self.project, &secret, baseline));
        Ok(())
    }

    /// Delete the secret under the cursor from the row's environment.
    ///
    /// Other placements of the same identifier are left alone.
    pub fn delete_at_cursor(&mut self) -> Result<Secret, SecretlyError> {
        let secret = self.secret_at_cursor()?;
        let environment_id = self.row_at_cursor()?.environment_id.clone();
        let environment = self
            .project
            .environment_mut(&environment_id)
            .ok_or(SecretlyError::LookupFailed)?;
        if !environment.remove(&secret.id) {
            return Err(SecretlyError::LookupFailed);
        }
        let message = format!("Deleted {} from {}", secret.name, environment.name);
        info!("{}", message);
        self.status = Some(message);
        self.rebuild_rows();
        Ok(secret)
    }

    /// Apply a submitted form and return to browsing.
    ///
    /// An unsubmitted form is put back in place.
    pub fn on_submit(&mut self, form: SecretForm) {
        let is_edit = form.is_edit();
        match form.into_submission() {
            Ok(submission) => {
                let reconciliation = submission.reconcile();
                reconciliation.apply(&mut self.project);
                let message = describe(&reconciliation, submission.is_edit());
                info!("{}", message);
                self.status = Some(message);
                self.rebuild_rows();
                self.view = ProjectView::Browsing;
            }
            Err(form) if is_edit => self.view = ProjectView::UpdateSecret(form),
            Err(form) => self.view = ProjectView::AddSecret(form),
        }
    }

    fn handle_form_key(&mut self, key: &KeyEvent, keymap: &Keymap) {
        let view = std::mem::replace(&mut self.view, ProjectView::Browsing);
        let mut form = match view {
            ProjectView::AddSecret(form) | ProjectView::UpdateSecret(form) => form,
            ProjectView::Browsing => return,
        };

        match form.handle_key(key, keymap) {
            FormEvent::Continue if form.is_edit() => self.view = ProjectView::UpdateSecret(form),
            FormEvent::Continue => self.view = ProjectView::AddSecret(form),
            FormEvent::Submitted => self.on_submit(form),
            FormEvent::Cancelled => {
                debug!("Secret form cancelled");
                self.status = Some("Cancelled".to_string());
            }
        }
    }

    fn handle_browsing_key(&mut self, key: &KeyEvent, keymap: &Keymap) -> ScreenAction {
        let Some(action) = keymap.action_for(key) else {
            return ScreenAction::None;
        };

        match action {
            Action::Quit => return ScreenAction::Exit,
            Action::Cancel => self.table_focused = !self.table_focused,
            Action::Create => self.begin_add(),
            Action::Edit => {
                if let Err(e) = self.begin_edit() {
                    debug!("Edit ignored: {}", e);
                }
            }
            Action::Delete => {
                if let Err(e) = self.delete_at_cursor() {
                    debug!("Delete ignored: {}", e);
                }
            }
            Action::MoveUp if self.table_focused => {
                let current = self.table_state.selected().unwrap_or(0);
                self.select_row(current.saturating_sub(1));
            }
            Action::MoveDown if self.table_focused => {
                let current = self.table_state.selected().unwrap_or(0);
                self.select_row(current + 1);
            }
            Action::Home if self.table_focused => self.select_row(0),
            Action::End if self.table_focused => self.select_row(usize::MAX),
            _ => {}
        }
        ScreenAction::None
    }

    fn render_browser(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let summary_height = self.project.environments.len() as u16 + 2;
        // Header row, its bottom margin and the borders
        let table_height = ctx.config.table_height + 4;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(summary_height),
                Constraint::Length(table_height),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(area);

        let mut summary = vec![
            Line::styled(format!("Project: {}", self.project.name), theme.title_style()),
            Line::default(),
        ];
        summary.extend(self.project.environments.iter().map(|env| {
            Line::styled(
                format!("- {} ({} Secrets)", env.name, env.secrets.len()),
                theme.text_style(),
            )
        }));
        frame.render_widget(Paragraph::new(summary), chunks[0]);

        let header = Row::new(vec!["ID", "Name", "Environment"])
            .style(theme.title_style())
            .bottom_margin(1);
        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|row| {
                Row::new(vec![
                    row.secret_id.clone(),
                    row.secret_name.clone(),
                    row.environment_name.clone(),
                ])
                .style(theme.text_style())
            })
            .collect();

        let border_style = if self.table_focused {
            theme.border_focused_style()
        } else {
            theme.border_style()
        };
        let highlight = if self.table_focused {
            theme.highlight_style()
        } else {
            theme.muted_style()
        };
        let table = Table::new(
            rows,
            [
                Constraint::Length(36),
                Constraint::Min(20),
                Constraint::Length(20),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(" Secrets ")
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .row_highlight_style(highlight)
        .highlight_symbol(LIST_HIGHLIGHT_SYMBOL);
        frame.render_stateful_widget(table, chunks[1], &mut self.table_state);

        if let Some(status) = &self.status {
            frame.render_widget(
                Paragraph::new(Line::styled(status.as_str(), theme.success_style())),
                chunks[2],
            );
        }

        let keymap = ctx.keymap();
        let hints = format!(
            "{} | Focus: {} | {}",
            keymap.hints(&[Action::Create, Action::Edit, Action::Delete]),
            keymap.get_key_display_for_action(Action::Cancel),
            keymap.hint(Action::Quit),
        );
        Footer::render(frame, chunks[4], &hints, theme);
    }
}

/// One-line summary of an applied reconciliation.
fn describe(reconciliation: &Reconciliation, is_edit: bool) -> String {
    let name = reconciliation.secret_name().unwrap_or("secret");
    let names = |envs: &[EnvironmentRef]| {
        envs.iter()
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    if !is_edit {
        let count = reconciliation.secrets.len();
        let plural = if count == 1 { "" } else { "s" };
        return format!("Added {} to {} environment{}", name, count, plural);
    }

    let mut message = format!("Updated {}", name);
    if !reconciliation.added.is_empty() {
        message.push_str(&format!(", added to {}", names(&reconciliation.added)));
    }
    if !reconciliation.removed.is_empty() {
        message.push_str(&format!(", removed from {}", names(&reconciliation.removed)));
    }
    message
}

impl Screen for ProjectScreen {
    fn handle_message(&mut self, message: Message, ctx: &ScreenContext) -> Result<ScreenAction> {
        let Message::Key(key) = message else {
            return Ok(ScreenAction::None);
        };

        match self.view {
            ProjectView::Browsing => Ok(self.handle_browsing_key(&key, ctx.keymap())),
            ProjectView::AddSecret(_) | ProjectView::UpdateSecret(_) => {
                self.handle_form_key(&key, ctx.keymap());
                Ok(ScreenAction::None)
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        if let ProjectView::AddSecret(form) | ProjectView::UpdateSecret(form) = &self.view {
            form.render(frame, area, ctx);
            return Ok(());
        }
        self.render_browser(frame, area, ctx);
        Ok(())
    }

    fn is_input_focused(&self) -> bool {
        match &self.view {
            ProjectView::AddSecret(form) | ProjectView::UpdateSecret(form) => {
                form.is_input_focused()
            }
            ProjectView::Browsing => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn send(screen: &mut ProjectScreen, code: KeyCode) -> ScreenAction {
        let config = Config::default();
        screen
            .handle_message(
                Message::Key(KeyEvent::new(code, KeyModifiers::NONE)),
                &ScreenContext::new(&config),
            )
            .unwrap()
    }

    #[test]
    fn test_rows_follow_environment_then_secret_order() {
        let screen = ProjectScreen::new(Project::demo());
        let envs: Vec<&str> = screen
            .rows()
            .iter()
            .map(|r| r.environment_name.as_str())
            .collect();
        assert_eq!(
            envs,
            vec!["development", "development", "staging", "staging", "production", "production"]
        );
        assert_eq!(screen.cursor(), Some(0));
    }

    #[test]
    fn test_empty_table_lookup_fails() {
        let mut screen = ProjectScreen::new(Project::new("p", &["dev"]));
        assert_eq!(screen.cursor(), None);
        assert_eq!(screen.secret_at_cursor(), Err(SecretlyError::LookupFailed));
        assert_eq!(screen.begin_edit(), Err(SecretlyError::LookupFailed));
        assert!(matches!(screen.view(), ProjectView::Browsing));
    }

    #[test]
    fn test_delete_removes_only_highlighted_placement() {
        let mut screen = ProjectScreen::new(Project::demo());
        screen.select_row(1);
        let deleted = screen.delete_at_cursor().unwrap();

        assert_eq!(deleted.name, "API_KEY");
        assert_eq!(screen.rows().len(), 5);
        assert_eq!(screen.project().secret_count(), 5);
        assert_eq!(screen.status(), Some("Deleted API_KEY from development"));
        assert_eq!(screen.cursor(), Some(1));
    }

    #[test]
    fn test_delete_goes_through_the_row_environment() {
        let mut project = Project::new("p", &["dev", "prod"]);
        // Snapshot secret whose own environment field disagrees with its holder
        let mut secret = Secret::build("K", "v", &project.id, &project.environments[0].id);
        secret.environment_id = project.environments[1].id.clone();
        project.environments[0].secrets.push(secret);

        let mut screen = ProjectScreen::new(project);
        let deleted = screen.delete_at_cursor().unwrap();
        assert_eq!(deleted.name, "K");
        assert!(screen.rows().is_empty());
        assert_eq!(screen.project().secret_count(), 0);
        assert_eq!(screen.status(), Some("Deleted K from dev"));
    }

    #[test]
    fn test_delete_keeps_other_placements_of_the_id() {
        let mut screen = ProjectScreen::new(Project::demo());
        // Row 1 is API_KEY in development; staging and production keep theirs
        screen.select_row(1);
        let deleted = screen.delete_at_cursor().unwrap();
        assert_eq!(screen.project().placements(&deleted.id), vec![1, 2]);
    }

    #[test]
    fn test_cursor_clamped_after_deleting_last_row() {
        let mut screen = ProjectScreen::new(Project::demo());
        screen.select_row(usize::MAX);
        assert_eq!(screen.cursor(), Some(5));
        screen.delete_at_cursor().unwrap();
        assert_eq!(screen.cursor(), Some(4));
    }

    #[test]
    fn test_navigation_keys_move_cursor() {
        let mut screen = ProjectScreen::new(Project::demo());
        send(&mut screen, KeyCode::Down);
        send(&mut screen, KeyCode::Down);
        assert_eq!(screen.cursor(), Some(2));
        send(&mut screen, KeyCode::Up);
        assert_eq!(screen.cursor(), Some(1));
        send(&mut screen, KeyCode::End);
        assert_eq!(screen.cursor(), Some(5));
    }

    #[test]
    fn test_esc_blurs_table_and_freezes_cursor() {
        let mut screen = ProjectScreen::new(Project::demo());
        send(&mut screen, KeyCode::Esc);
        assert!(!screen.is_table_focused());
        send(&mut screen, KeyCode::Down);
        assert_eq!(screen.cursor(), Some(0));
        send(&mut screen, KeyCode::Esc);
        assert!(screen.is_table_focused());
    }

    #[test]
    fn test_shortcuts_open_forms() {
        let mut screen = ProjectScreen::new(Project::demo());
        send(&mut screen, KeyCode::Char('n'));
        assert!(matches!(screen.view(), ProjectView::AddSecret(_)));
        assert!(screen.is_input_focused());

        send(&mut screen, KeyCode::Esc);
        assert!(matches!(screen.view(), ProjectView::Browsing));

        send(&mut screen, KeyCode::Char('e'));
        match screen.view() {
            ProjectView::UpdateSecret(form) => {
                assert_eq!(form.name().text(), "DATABASE_URL");
                assert_eq!(form.selector().baseline().len(), 2);
            }
            other => panic!("expected edit form, got {:?}", other),
        }
    }

    #[test]
    fn test_quit_from_browsing() {
        let mut screen = ProjectScreen::new(Project::demo());
        assert!(matches!(send(&mut screen, KeyCode::Char('q')), ScreenAction::Exit));
    }

    #[test]
    fn test_q_inside_form_is_typed() {
        let mut screen = ProjectScreen::new(Project::demo());
        send(&mut screen, KeyCode::Char('a'));
        assert!(matches!(send(&mut screen, KeyCode::Char('q')), ScreenAction::None));
        match screen.view() {
            ProjectView::AddSecret(form) => assert_eq!(form.name().text(), "q"),
            other => panic!("expected add form, got {:?}", other),
        }
    }

    #[test]
    fn test_describe_edit() {
        let project = Project::new("p", &["dev", "staging", "prod"]);
        let choices = EnvironmentRef::capture(&project.environments);
        let reconciliation = Reconciliation {
            secrets: vec![Secret::build("API_KEY", "abc", &project.id, &choices[0].id)],
            added: vec![choices[1].clone()],
            removed: vec![choices[2].clone()],
            original_id: Some("id".to_string()),
        };
        assert_eq!(
            describe(&reconciliation, true),
            "Updated API_KEY, added to staging, removed from prod"
        );
    }
}
