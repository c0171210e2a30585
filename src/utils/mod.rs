pub(crate) mod text;
pub(crate) mod terminal;

// Public API - utilities used by commands
pub use terminal::{clear_screen, set_terminal_title, set_terminal_title_and_flush};
pub use text::truncate;
