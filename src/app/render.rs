//! UI rendering for the App.

use ratatui::{
    Frame,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::App;
use crate::tui::widgets::{ChatView, InputView};

/// Key hints shown in the footer.
const FOOTER_HINTS: &str =
    " Enter send | PgUp/PgDn scroll | Ctrl+Home/End jump | F2 timestamps | Ctrl+L clear | Esc quit";

impl App {
    /// Renders the full screen.
    pub fn render(&mut self, frame: &mut Frame) {
        let layout = self.layout;

        self.render_header(frame);

        let scrolled = self.viewport.scroll().user_scrolled();
        let chat_title = if scrolled { " Chat (history) " } else { " Chat " };
        let chat_block = Block::default()
            .title(Span::styled(chat_title, self.theme.header_style()))
            .borders(Borders::ALL)
            .border_style(if scrolled {
                self.theme.scrolled_border_style()
            } else {
                self.theme.border_style()
            });
        frame.render_stateful_widget(
            ChatView::new().block(chat_block),
            layout.chat,
            &mut self.viewport,
        );

        let input_block = Block::default()
            .title(Span::styled(" Say ", self.theme.header_style()))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());
        let input = InputView::new(&self.theme)
            .block(input_block)
            .caret_on(self.caret_on);
        frame.render_stateful_widget(input, layout.input, &mut self.input);

        frame.render_widget(
            Paragraph::new(Span::styled(FOOTER_HINTS, self.theme.muted_style())),
            layout.footer,
        );
    }

    fn render_header(&self, frame: &mut Frame) {
        let store = self.viewport.store();
        let header = Line::from(vec![
            Span::styled(" chatframe ", self.theme.header_style()),
            Span::styled(
                format!("{}/{} lines", store.len(), store.capacity()),
                self.theme.muted_style(),
            ),
        ]);
        frame.render_widget(Paragraph::new(header), self.layout.header);
    }
}
