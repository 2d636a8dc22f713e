//! Semantic actions a key can be bound to.

use serde::{Deserialize, Serialize};

/// What a key press means, independent of which key it was.
///
/// Serialized in snake_case, which is how the config file names them
/// (`action = "toggle_select"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Previous row of the secrets table or environment list
    MoveUp,
    /// Next row
    MoveDown,
    MoveLeft,
    MoveRight,
    Home,
    End,

    /// Enter: submit the form, pick the landing option
    Confirm,
    /// Esc: leave the form or screen
    Cancel,
    /// Space: tick an environment
    ToggleSelect,
    Quit,

    Create,
    Edit,
    Delete,

    Backspace,
    DeleteChar,

    NextField,
    PrevField,
}

impl Action {
    /// Label shown next to the key in footer hints.
    pub fn label(&self) -> &'static str {
        use Action::*;
        match self {
            MoveUp => "Up",
            MoveDown => "Down",
            MoveLeft => "Left",
            MoveRight => "Right",
            Home => "Start",
            End => "End",
            Confirm => "Select",
            Cancel => "Back",
            ToggleSelect => "Toggle",
            Quit => "Quit",
            Create => "New",
            Edit => "Edit",
            Delete => "Delete",
            Backspace => "Erase",
            DeleteChar => "Erase forward",
            NextField => "Next",
            PrevField => "Previous",
        }
    }
}
