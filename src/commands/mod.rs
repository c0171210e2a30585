//! Terminal views, one per subcommand

pub(crate) mod input;
pub mod moderator;
pub mod play;
pub mod render;
pub mod supporter;
pub mod watch;

pub use moderator::handle_moderator_command;
pub use play::handle_play_command;
pub use supporter::handle_supporter_command;
pub use watch::handle_watch_command;
