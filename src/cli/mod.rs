//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{FlattenCommand, PlanCommand, ValidateCommand};
use std::ffi::OsString;

/// Blueprint plan compiler
#[derive(Debug, Parser, Clone)]
#[command(name = "blueprint")]
#[command(author = "Blueprint Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Compiles data-source blueprints into collection plans", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Compile a blueprint into a pipeline plan and domain scopes
    Plan(PlanCommand),

    /// Validate a blueprint configuration
    Validate(ValidateCommand),

    /// Flatten nested task records from a JSON file
    Flatten(FlattenCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
