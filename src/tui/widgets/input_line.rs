//! Single-line chat input widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, StatefulWidget, Widget},
};

use crate::core::InputLine;
use crate::tui::Theme;
use crate::tui::metrics::CellMetrics;
use crate::tui::surface::{BufferSurface, px_rect};

/// Renders an [`InputLine`] with a block caret.
///
/// The caret is drawn as a highlighted cell; pass `caret_on = false` during
/// the off phase of the blink.
#[derive(Debug, Clone)]
pub struct InputView<'a> {
    theme: &'a Theme,
    block: Option<Block<'a>>,
    caret_on: bool,
}

impl<'a> InputView<'a> {
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            block: None,
            caret_on: true,
        }
    }

    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    #[must_use]
    pub const fn caret_on(mut self, on: bool) -> Self {
        self.caret_on = on;
        self
    }
}

impl StatefulWidget for InputView<'_> {
    type State = InputLine;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };

        // Only the first row of a taller area holds text.
        let line = Rect { height: inner.height.min(1), ..inner };
        let mut surface = BufferSurface::new(buf);
        state.render(
            &mut surface,
            px_rect(line),
            &CellMetrics,
            self.theme.input_text,
            self.theme.caret,
            self.caret_on,
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use ratatui::style::Color;
    use ratatui::widgets::Borders;
    use ratatui::{Terminal, backend::TestBackend};

    fn typed(text: &str) -> InputLine {
        let mut input = InputLine::new(None);
        input.insert_str(text);
        input
    }

    fn draw(
        terminal: &mut Terminal<TestBackend>,
        state: &mut InputLine,
        caret_on: bool,
    ) -> Result<()> {
        let theme = Theme::default();
        terminal.draw(|frame| {
            let widget = InputView::new(&theme)
                .block(Block::default().borders(Borders::ALL))
                .caret_on(caret_on);
            frame.render_stateful_widget(widget, frame.area(), state);
        })?;
        Ok(())
    }

    fn row(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect()
    }

    fn caret_color() -> Color {
        let caret = Theme::default().caret;
        Color::Rgb(caret.r, caret.g, caret.b)
    }

    #[test]
    fn renders_text_and_caret() -> Result<()> {
        let mut terminal = Terminal::new(TestBackend::new(12, 3))?;
        let mut state = typed("hello");

        draw(&mut terminal, &mut state, true)?;

        assert_eq!(row(&terminal, 1), "│hello     │");
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(6, 1)].bg, caret_color());
        assert_ne!(buffer[(5, 1)].bg, caret_color());
        Ok(())
    }

    #[test]
    fn caret_off_phase_draws_no_caret() -> Result<()> {
        let mut terminal = Terminal::new(TestBackend::new(12, 3))?;
        let mut state = typed("hello");

        draw(&mut terminal, &mut state, false)?;

        let buffer = terminal.backend().buffer();
        assert_ne!(buffer[(6, 1)].bg, caret_color());
        Ok(())
    }

    #[test]
    fn long_text_scrolls_to_keep_caret_visible() -> Result<()> {
        let mut terminal = Terminal::new(TestBackend::new(12, 3))?;
        let mut state = typed("abcdefghijklmno");

        draw(&mut terminal, &mut state, true)?;

        assert_eq!(state.horizontal_scroll(), 6);
        assert_eq!(row(&terminal, 1), "│ghijklmno │");
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(10, 1)].bg, caret_color());
        Ok(())
    }

    #[test]
    fn text_never_leaks_over_border() -> Result<()> {
        let mut terminal = Terminal::new(TestBackend::new(8, 3))?;
        let mut state = typed("0123456789");
        state.move_caret(crate::core::CaretMove::Home);

        draw(&mut terminal, &mut state, true)?;

        assert_eq!(row(&terminal, 1), "│012345│");
        Ok(())
    }
}
