use crate::styles::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Common footer component
pub struct Footer;

impl Footer {
    /// Render key hints like `"New: n | Edit: e | Quit: q"`.
    ///
    /// Each `label: keys` part gets the label in the title style and the keys
    /// emphasized. Returns the height used (1 for border, 1 for text).
    pub fn render(frame: &mut Frame, area: Rect, text: &str, theme: &Theme) -> u16 {
        let footer_block = Block::default()
            .borders(Borders::TOP)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_style());

        let footer_inner = footer_block.inner(area);
        let footer = Paragraph::new(Self::spans(text, theme)).alignment(Alignment::Center);

        frame.render_widget(footer_block, area);
        frame.render_widget(footer, footer_inner);

        2
    }

    fn spans<'a>(text: &'a str, theme: &Theme) -> Line<'a> {
        let mut spans = Vec::new();
        for (i, part) in text.split(" | ").enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", theme.muted_style()));
            }
            match part.split_once(": ") {
                Some((label, keys)) => {
                    spans.push(Span::styled(format!("{}: ", label), theme.title_style()));
                    spans.push(Span::styled(keys, theme.emphasis_style()));
                }
                None => spans.push(Span::styled(part, theme.text_style())),
            }
        }
        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_split_labels_and_keys() {
        let theme = Theme::dark();
        let line = Footer::spans("New: n | Quit: q", &theme);
        let text: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, vec!["New: ", "n", " | ", "Quit: ", "q"]);
    }
}
