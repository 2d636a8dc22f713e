//! Add / edit form for a single secret.
//!
//! Focus walks `EditingName -> EditingValue -> SelectingEnvironments` and
//! ends in `Submitted`. A submitted form converts into a [`Submission`],
//! which is the only way to reach [`Submission::reconcile`].

use crate::forms::environment_selector::{
    Direction as CursorDirection, EnvironmentRef, EnvironmentSelector, SelectionSet,
};
use crate::forms::reconcile::{reconcile, ReconcileInput, Reconciliation};
use crate::keymap::{Action, Keymap};
use crate::model::{Project, Secret};
use crate::screens::RenderContext;
use crate::utils::text_input::TextInput;
use crate::widgets::{TextInputWidget, TextInputWidgetExt};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tracing::debug;

/// Hard cap shared by the name and value buffers
pub const FIELD_CHAR_LIMIT: usize = 156;
/// Columns of text visible in each input
pub const FIELD_DISPLAY_WIDTH: u16 = 20;

/// Which part of the form has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStage {
    EditingName,
    EditingValue,
    SelectingEnvironments,
    Submitted,
}

impl FormStage {
    fn next(self) -> Self {
        match self {
            Self::EditingName => Self::EditingValue,
            Self::EditingValue => Self::SelectingEnvironments,
            Self::SelectingEnvironments | Self::Submitted => Self::Submitted,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::EditingName | Self::EditingValue => Self::EditingName,
            Self::SelectingEnvironments => Self::EditingValue,
            Self::Submitted => Self::Submitted,
        }
    }
}

/// Outcome of feeding one key to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Continue,
    Submitted,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct SecretForm {
    project_id: String,
    name: TextInput,
    value: TextInput,
    selector: EnvironmentSelector,
    stage: FormStage,
    /// Secret being edited; `None` in add mode
    original: Option<Secret>,
}

impl SecretForm {
    /// Blank form with nothing selected.
    pub fn new_add(project: &Project) -> Self {
        Self::build(project, SelectionSet::new(), None)
    }

    /// Form pre-filled from `secret`, with `baseline` marking the environments
    /// that hold it right now.
    pub fn new_edit(project: &Project, secret: &Secret, baseline: SelectionSet) -> Self {
        let mut form = Self::build(project, baseline, Some(secret.clone()));
        form.name.set_text(secret.name.as_str());
        form.value.set_text(secret.value.as_str());
        form
    }

    fn build(project: &Project, baseline: SelectionSet, original: Option<Secret>) -> Self {
        Self {
            project_id: project.id.clone(),
            name: TextInput::new().with_char_limit(FIELD_CHAR_LIMIT),
            value: TextInput::new().with_char_limit(FIELD_CHAR_LIMIT),
            selector: EnvironmentSelector::new(
                EnvironmentRef::capture(&project.environments),
                baseline,
            ),
            stage: FormStage::EditingName,
            original,
        }
    }

    pub fn stage(&self) -> FormStage {
        self.stage
    }

    pub fn submitted(&self) -> bool {
        self.stage == FormStage::Submitted
    }

    pub fn is_edit(&self) -> bool {
        self.original.is_some()
    }

    pub fn name(&self) -> &TextInput {
        &self.name
    }

    pub fn value(&self) -> &TextInput {
        &self.value
    }

    pub fn selector(&self) -> &EnvironmentSelector {
        &self.selector
    }

    /// Whether a text buffer has focus.
    pub fn is_input_focused(&self) -> bool {
        matches!(self.stage, FormStage::EditingName | FormStage::EditingValue)
    }

    pub fn advance(&mut self) {
        self.stage = self.stage.next();
    }

    pub fn retreat(&mut self) {
        self.stage = self.stage.previous();
    }

    /// Feed one key event to the form.
    pub fn handle_key(&mut self, key: &KeyEvent, keymap: &Keymap) -> FormEvent {
        if self.submitted() {
            return FormEvent::Submitted;
        }

        let action = keymap.action_for(key);
        let event = match self.stage {
            FormStage::EditingName | FormStage::EditingValue => self.handle_text_key(key, action),
            FormStage::SelectingEnvironments => self.handle_selector_key(action),
            FormStage::Submitted => FormEvent::Submitted,
        };

        if self.submitted() {
            FormEvent::Submitted
        } else {
            event
        }
    }

    fn handle_text_key(&mut self, key: &KeyEvent, action: Option<Action>) -> FormEvent {
        if let Some(action) = action.filter(TextInput::is_action_allowed_when_focused) {
            match action {
                Action::Cancel => return FormEvent::Cancelled,
                Action::Confirm | Action::NextField => self.advance(),
                Action::PrevField => self.retreat(),
                other => {
                    self.focused_input_mut().handle_action(other);
                }
            }
            return FormEvent::Continue;
        }

        match key.code {
            KeyCode::Char(_)
                if key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                debug!("Ignoring modified key in text field: {:?}", key);
            }
            code => {
                self.focused_input_mut().handle_key(code);
            }
        }
        FormEvent::Continue
    }

    fn handle_selector_key(&mut self, action: Option<Action>) -> FormEvent {
        match action {
            Some(Action::MoveUp) => self.selector.move_cursor(CursorDirection::Up),
            Some(Action::MoveDown) => self.selector.move_cursor(CursorDirection::Down),
            Some(Action::ToggleSelect) => self.selector.toggle(),
            Some(Action::Confirm) | Some(Action::NextField) => self.advance(),
            Some(Action::PrevField) => self.retreat(),
            Some(Action::Cancel) => return FormEvent::Cancelled,
            _ => {}
        }
        FormEvent::Continue
    }

    fn focused_input_mut(&mut self) -> &mut TextInput {
        match self.stage {
            FormStage::EditingValue => &mut self.value,
            _ => &mut self.name,
        }
    }

    /// Consume a submitted form. An unsubmitted form is handed back unchanged.
    pub fn into_submission(self) -> Result<Submission, Self> {
        if !self.submitted() {
            return Err(self);
        }
        let (choices, selected, baseline) = self.selector.into_parts();
        Ok(Submission {
            project_id: self.project_id,
            name: self.name.text().to_string(),
            value: self.value.text().to_string(),
            choices,
            selected,
            baseline,
            original: self.original,
        })
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let list_height = self.selector.choices().len() as u16 + 2;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(list_height),
                Constraint::Min(0),
            ])
            .split(area);

        let heading = if self.is_edit() { "Edit secret" } else { "New secret" };
        let title = Paragraph::new(vec![
            Line::styled("What's your secret?", theme.title_style()),
            Line::styled(heading, theme.muted_style()),
        ]);
        frame.render_widget(title, chunks[0]);

        let field_width = (FIELD_DISPLAY_WIDTH + 2).min(area.width);
        let name_area = Rect {
            width: field_width,
            ..chunks[1]
        };
        let value_area = Rect {
            width: field_width,
            ..chunks[2]
        };

        frame.render_text_input_widget(
            TextInputWidget::new(&self.name, theme)
                .placeholder("Name")
                .display_width(FIELD_DISPLAY_WIDTH)
                .focused(self.stage == FormStage::EditingName),
            name_area,
        );
        frame.render_text_input_widget(
            TextInputWidget::new(&self.value, theme)
                .placeholder("Value")
                .display_width(FIELD_DISPLAY_WIDTH)
                .focused(self.stage == FormStage::EditingValue),
            value_area,
        );

        self.selector.render(
            frame,
            chunks[3],
            ctx,
            self.stage == FormStage::SelectingEnvironments,
        );

        let hints = ctx.keymap().hints(&[
            Action::NextField,
            Action::PrevField,
            Action::ToggleSelect,
            Action::Cancel,
        ]);
        let hints = Paragraph::new(Line::styled(hints, theme.muted_style()));
        frame.render_widget(hints, chunks[4]);
    }
}

/// Everything a submitted form captured. Owning one proves the form was
/// submitted.
#[derive(Debug, Clone)]
pub struct Submission {
    project_id: String,
    name: String,
    value: String,
    choices: Vec<EnvironmentRef>,
    selected: SelectionSet,
    baseline: SelectionSet,
    original: Option<Secret>,
}

impl Submission {
    pub fn reconcile(&self) -> Reconciliation {
        reconcile(ReconcileInput {
            project_id: &self.project_id,
            name: &self.name,
            value: &self.value,
            choices: &self.choices,
            selected: &self.selected,
            baseline: &self.baseline,
            original: self.original.as_ref(),
        })
    }

    pub fn is_edit(&self) -> bool {
        self.original.is_some()
    }
}
