//! Hive CLI library.
//!
//! This library provides the core functionality for the `hive` command-line
//! interface: configuration management, command execution and output
//! formatting. Commands are generic over the store so they can run against
//! an in-memory corpus in tests.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
