//! Bordered single-line field for a [`TextInput`].
//!
//! Draws a bordered single-line field that scrolls horizontally so the cursor
//! stays visible, shows a placeholder while empty, and places the terminal
//! cursor when focused.

use crate::styles::Theme;
use crate::utils::text_input::TextInput;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Draws a [`TextInput`] in the current theme.
///
/// # Example
/// ```
/// use secretly::styles::Theme;
/// use secretly::utils::text_input::TextInput;
/// use secretly::widgets::TextInputWidget;
///
/// let theme = Theme::dark();
/// let input = TextInput::with_text("hello");
/// let widget = TextInputWidget::new(&input, &theme)
///     .title("Name")
///     .placeholder("Name")
///     .display_width(20)
///     .focused(true);
/// // frame.render_text_input_widget(widget, area);
/// # let _ = widget;
/// ```
pub struct TextInputWidget<'a> {
    input: &'a TextInput,
    theme: &'a Theme,
    title: Option<&'a str>,
    placeholder: Option<&'a str>,
    focused: bool,
    /// Maximum columns of text shown, narrower than the inner area if set
    display_width: Option<u16>,
}

impl<'a> TextInputWidget<'a> {
    pub fn new(input: &'a TextInput, theme: &'a Theme) -> Self {
        Self {
            input,
            theme,
            title: None,
            placeholder: None,
            focused: false,
            display_width: None,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Limit how many columns of text are shown at once.
    pub fn display_width(mut self, width: u16) -> Self {
        self.display_width = Some(width);
        self
    }

    /// Columns available for text inside `inner`.
    fn text_width(&self, inner: Rect) -> usize {
        let width = match self.display_width {
            Some(limit) => limit.min(inner.width),
            None => inner.width,
        };
        width as usize
    }

    /// Visible text and the cursor column within it.
    fn window(&self, inner: Rect) -> (String, usize) {
        if self.input.text().is_empty() {
            return (self.placeholder.unwrap_or("").to_string(), 0);
        }
        self.input.visible_window(self.text_width(inner))
    }

    fn content_style(&self) -> Style {
        if self.input.text().is_empty() {
            self.theme.placeholder_style()
        } else {
            self.theme.text_style()
        }
    }

    fn frame_style(&self) -> Style {
        if self.focused {
            self.theme.border_focused_style()
        } else {
            self.theme.border_style()
        }
    }

    fn block(&self) -> Block<'a> {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.frame_style());
        match self.title {
            Some(title) => block.title(format!(" {} ", title)),
            None => block,
        }
    }

    /// Terminal cursor position for this widget drawn in `area`.
    fn cursor_position(&self, area: Rect) -> Position {
        let inner = self.block().inner(area);
        let (_, column) = self.window(inner);
        let max_x = inner.width.saturating_sub(1);
        Position::new(inner.x + (column as u16).min(max_x), inner.y)
    }
}

impl Widget for TextInputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let frame = self.block();
        let (visible, _) = self.window(frame.inner(area));

        Paragraph::new(visible)
            .block(frame)
            .style(self.content_style())
            .render(area, buf);
    }
}

/// Renders a field and, when it has focus, moves the terminal cursor into it.
///
/// `Widget::render` only sees the buffer, so cursor placement needs the frame.
pub trait TextInputWidgetExt {
    fn render_text_input_widget(&mut self, widget: TextInputWidget, area: Rect);
}

impl TextInputWidgetExt for Frame<'_> {
    fn render_text_input_widget(&mut self, widget: TextInputWidget, area: Rect) {
        let cursor = widget.focused.then(|| widget.cursor_position(area));
        self.render_widget(widget, area);
        if let Some(position) = cursor {
            self.set_cursor_position(position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_placeholder_shown_when_empty() {
        let theme = Theme::dark();
        let input = TextInput::new();
        let widget = TextInputWidget::new(&input, &theme).placeholder("Name");
        let inner = Rect::new(1, 1, 20, 1);
        assert_eq!(widget.window(inner), ("Name".to_string(), 0));
    }

    #[test]
    fn test_display_width_caps_visible_text() {
        let theme = Theme::dark();
        let input = TextInput::with_text("abcdefghijklmnopqrstuvwxyz");
        let widget = TextInputWidget::new(&input, &theme).display_width(5);
        let (visible, column) = widget.window(Rect::new(0, 0, 40, 1));
        assert_eq!(visible, "wxyz");
        assert_eq!(column, 4);
    }

    #[test]
    fn test_focused_render_places_cursor() {
        let theme = Theme::dark();
        let input = TextInput::with_text("abc");
        let mut terminal = Terminal::new(TestBackend::new(30, 3)).unwrap();
        terminal
            .draw(|frame| {
                let widget = TextInputWidget::new(&input, &theme).focused(true);
                frame.render_text_input_widget(widget, frame.area());
            })
            .unwrap();
        terminal.show_cursor().unwrap();
        assert_eq!(terminal.get_cursor_position().unwrap(), Position::new(4, 1));

        let buffer = terminal.backend().buffer();
        let row: String = (1..4).map(|x| buffer[(x, 1)].symbol().to_string()).collect();
        assert_eq!(row, "abc");
    }
}
