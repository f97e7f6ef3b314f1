//! Command-line interface definitions.
//!
//! - `Cli`: argument parsing via clap
//! - `Display`: styled status messages on stderr

mod commands;
mod display;

pub use commands::Cli;
pub use display::Display;
