//! Fleet lifecycle CLI library.
//!
//! This crate provides the batch command-line interface over `fleet-core`.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, ReportArgs};
pub use config::Config;
