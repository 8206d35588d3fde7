mod args;
mod commands;
mod handlers;

pub use args::{Cli, Commands, SessionCommand, VendorCommand};
pub use commands::run;
