// Reusable UI widgets

pub mod spinner;
pub mod text_input;

pub use spinner::Spinner;
pub use text_input::{TextInputWidget, TextInputWidgetExt};
