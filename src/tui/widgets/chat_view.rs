//! Chat scrollback widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, StatefulWidget, Widget},
};

use crate::core::ChatViewport;
use crate::tui::metrics::CellMetrics;
use crate::tui::surface::{BufferSurface, px_rect};

/// Renders a [`ChatViewport`] into the area inside an optional block.
///
/// Each terminal row is one text row; the scrollbar takes the rightmost
/// column(s) of the inner area.
#[derive(Debug, Clone, Default)]
pub struct ChatView<'a> {
    block: Option<Block<'a>>,
}

impl<'a> ChatView<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl StatefulWidget for ChatView<'_> {
    type State = ChatViewport;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };

        let mut surface = BufferSurface::new(buf);
        state.render(&mut surface, px_rect(inner), &CellMetrics, 1);
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

    use crate::core::{ChannelPalette, ChannelTag, PxPoint, Rgba, ViewportConfig};

    fn viewport() -> ChatViewport {
        ChatViewport::new(ViewportConfig::default(), ChannelPalette::default())
    }

    fn draw(terminal: &mut Terminal<TestBackend>, state: &mut ChatViewport) -> Result<()> {
        terminal.draw(|frame| {
            let widget = ChatView::new().block(Block::default().borders(Borders::ALL));
            frame.render_stateful_widget(widget, frame.area(), state);
        })?;
        Ok(())
    }

    fn row(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect()
    }

    #[test]
    fn renders_lines_inside_border() -> Result<()> {
        let mut terminal = Terminal::new(TestBackend::new(30, 6))?;
        let mut state = viewport();
        state.push_line("hello", ChannelTag::Public, 0, Some("Ann"), None);
        state.push_line("server restart", ChannelTag::System, 0, None, None);

        draw(&mut terminal, &mut state)?;

        assert!(row(&terminal, 1).contains("Ann: hello"));
        assert!(row(&terminal, 2).contains("[System] server restart"));
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(0, 0)].symbol(), "┌");
        assert_eq!(buffer[(29, 5)].symbol(), "┘");
        Ok(())
    }

    #[test]
    fn channel_color_reaches_cells() -> Result<()> {
        let mut terminal = Terminal::new(TestBackend::new(30, 4))?;
        let mut state = viewport();
        state.push_line("<col=ff0000>red</col>", ChannelTag::Public, 0, None, None);

        draw(&mut terminal, &mut state)?;

        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(1, 1)].symbol(), "r");
        assert_eq!(buffer[(1, 1)].fg, Color::Rgb(0xff, 0, 0));
        Ok(())
    }

    #[test]
    fn long_lines_wrap_to_inner_width() -> Result<()> {
        // Inner area is 11 columns: 10 for text, 1 for the scrollbar.
        let mut terminal = Terminal::new(TestBackend::new(13, 5))?;
        let mut state = viewport();
        state.push_line("aaaa bbbb cccc", ChannelTag::Public, 0, None, None);

        draw(&mut terminal, &mut state)?;

        assert_eq!(row(&terminal, 1), "│aaaa bbbb  │");
        assert_eq!(row(&terminal, 2), "│cccc       │");
        Ok(())
    }

    #[test]
    fn shows_newest_lines_and_scrollbar_on_overflow() -> Result<()> {
        let mut terminal = Terminal::new(TestBackend::new(20, 6))?;
        let mut state = viewport();
        for i in 0..12 {
            state.push_line(&format!("msg {i}"), ChannelTag::Public, 0, None, None);
        }

        draw(&mut terminal, &mut state)?;

        assert!(row(&terminal, 4).contains("msg 11"));
        assert!(row(&terminal, 1).contains("msg 8"));

        let geometry = *state.geometry().unwrap();
        let thumb_color = state.config().thumb_color;
        let buffer = terminal.backend().buffer();
        let thumb_cell = &buffer[(18, u16::try_from(geometry.thumb.y)?)];
        assert_eq!(
            thumb_cell.bg,
            Color::Rgb(thumb_color.r, thumb_color.g, thumb_color.b)
        );
        Ok(())
    }

    #[test]
    fn hit_test_uses_terminal_cells() -> Result<()> {
        let mut terminal = Terminal::new(TestBackend::new(30, 6))?;
        let mut state = viewport();
        state.push_line("first", ChannelTag::Public, 0, Some("Ann"), None);
        state.push_line("second", ChannelTag::Public, 0, Some("Bob"), None);

        draw(&mut terminal, &mut state)?;

        let hit = state.row_at(PxPoint::new(3, 2)).unwrap();
        assert_eq!(hit.line.sender.as_deref(), Some("Bob"));
        assert!(state.row_at(PxPoint::new(0, 2)).is_none());
        Ok(())
    }

    #[test]
    fn background_fills_whole_pane() -> Result<()> {
        let mut terminal = Terminal::new(TestBackend::new(10, 4))?;
        let config = ViewportConfig {
            background: Some(Rgba::rgb(0x10, 0x10, 0x10)),
            ..ViewportConfig::default()
        };
        let mut state = ChatViewport::new(config, ChannelPalette::default());

        draw(&mut terminal, &mut state)?;

        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(4, 2)].bg, Color::Rgb(0x10, 0x10, 0x10));
        Ok(())
    }
}
