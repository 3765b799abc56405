pub mod cli;
pub mod commands;
pub mod error;
pub mod interactive;
pub mod render;

pub use cli::{Cli, Command};
pub use error::CommandError;
