//! Custom TUI widgets.

pub mod chat_view;
pub mod input_line;

pub use chat_view::ChatView;
pub use input_line::InputView;
