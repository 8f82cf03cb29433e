//! CLI argument parsing and command dispatch

pub mod args;
pub mod check;
pub mod common;
pub mod list;
pub mod verify;

// Re-export types for convenient access
pub use args::{CheckArgs, Cli, Command};
