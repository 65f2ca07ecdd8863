pub mod commands;
pub mod output;

pub use commands::{run_command, Command, CommandOutput};
pub use output::render;
