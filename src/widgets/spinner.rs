//! Braille spinner advanced by tick messages.

use crate::styles::Theme;
use ratatui::text::Span;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone, Default)]
pub struct Spinner {
    index: usize,
    active: bool,
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start animating from the first frame.
    pub fn start(&mut self) {
        self.active = true;
        self.index = 0;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance one frame. Inactive spinners hold still.
    pub fn tick(&mut self) {
        if self.active {
            self.index = (self.index + 1) % FRAMES.len();
        }
    }

    pub fn symbol(&self) -> &'static str {
        FRAMES[self.index % FRAMES.len()]
    }

    pub fn span(&self, theme: &Theme) -> Span<'static> {
        Span::styled(self.symbol(), theme.spinner_style())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_cycles_frames() {
        let mut spinner = Spinner::new();
        spinner.start();
        for _ in 0..FRAMES.len() {
            spinner.tick();
        }
        assert_eq!(spinner.symbol(), FRAMES[0]);
        spinner.tick();
        assert_eq!(spinner.symbol(), FRAMES[1]);
    }

    #[test]
    fn test_stopped_spinner_does_not_advance() {
        let mut spinner = Spinner::new();
        spinner.tick();
        assert_eq!(spinner.symbol(), FRAMES[0]);
        assert!(!spinner.is_active());
    }
}
