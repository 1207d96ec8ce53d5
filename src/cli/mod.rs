//! CLI argument parsing and command dispatch.

pub mod args;
pub mod models;
pub mod quote;
pub mod simulate;
pub mod writers;

pub use args::{Cli, Commands, OutputFormat};
