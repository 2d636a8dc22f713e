//! Multi-select list of environments.
//!
//! Tracks the cursor, the live selection set and the baseline selection set
//! frozen when the owning form opened.

use crate::model::Environment;
use crate::screens::RenderContext;
use crate::styles::LIST_HIGHLIGHT_SYMBOL;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use std::collections::BTreeSet;

/// Set of indices into the environment list captured by a form.
pub type SelectionSet = BTreeSet<usize>;

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// An environment as captured by a form: its position and identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentRef {
    pub index: usize,
    pub id: String,
    pub name: String,
}

impl EnvironmentRef {
    /// Capture every environment of a project, in order.
    pub fn capture(environments: &[Environment]) -> Vec<Self> {
        environments
            .iter()
            .enumerate()
            .map(|(index, env)| Self {
                index,
                id: env.id.clone(),
                name: env.name.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct EnvironmentSelector {
    choices: Vec<EnvironmentRef>,
    cursor: usize,
    selected: SelectionSet,
    baseline: SelectionSet,
}

impl EnvironmentSelector {
    /// Create a selector whose current set starts equal to `baseline`.
    ///
    /// Indices outside the captured list are dropped.
    pub fn new(choices: Vec<EnvironmentRef>, baseline: SelectionSet) -> Self {
        let baseline: SelectionSet = baseline
            .into_iter()
            .filter(|&i| i < choices.len())
            .collect();
        Self {
            selected: baseline.clone(),
            baseline,
            choices,
            cursor: 0,
        }
    }

    /// Move the cursor one row, clamped to the list bounds.
    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.cursor = self.cursor.saturating_sub(1),
            Direction::Down => {
                let last = self.choices.len().saturating_sub(1);
                self.cursor = (self.cursor + 1).min(last);
            }
        }
    }

    /// Flip membership of the cursor row in the current set.
    pub fn toggle(&mut self) {
        if self.cursor >= self.choices.len() {
            return;
        }
        if !self.selected.remove(&self.cursor) {
            self.selected.insert(self.cursor);
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> &SelectionSet {
        &self.selected
    }

    pub fn baseline(&self) -> &SelectionSet {
        &self.baseline
    }

    pub fn choices(&self) -> &[EnvironmentRef] {
        &self.choices
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub(crate) fn into_parts(self) -> (Vec<EnvironmentRef>, SelectionSet, SelectionSet) {
        (self.choices, self.selected, self.baseline)
    }

    /// Render the checklist; the cursor marker only shows while focused.
    pub fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext, focused: bool) {
        let theme = ctx.theme;
        let blank = " ".repeat(LIST_HIGHLIGHT_SYMBOL.chars().count());
        let lines: Vec<Line> = self
            .choices
            .iter()
            .map(|choice| {
                let at_cursor = focused && choice.index == self.cursor;
                let marker = if at_cursor {
                    LIST_HIGHLIGHT_SYMBOL.to_string()
                } else {
                    blank.clone()
                };
                let checked = if self.is_selected(choice.index) { "x" } else { " " };
                let style = if at_cursor {
                    theme.emphasis_style()
                } else {
                    theme.text_style()
                };
                Line::from(vec![
                    Span::styled(marker, theme.emphasis_style()),
                    Span::styled(format!("[{}] {}", checked, choice.name), style),
                ])
            })
            .collect();

        let border_style = if focused {
            theme.border_focused_style()
        } else {
            theme.border_style()
        };
        let list = Paragraph::new(lines).block(
            Block::default()
                .title(" Environments ")
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        frame.render_widget(list, area);
    }
}
