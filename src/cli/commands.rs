//! CLI command definitions

use clap::Args;

/// Compile a blueprint
#[derive(Debug, Args, Clone)]
pub struct PlanCommand {
    /// Path to blueprint YAML file
    #[arg(short, long)]
    pub file: String,

    /// SQLite database holding scopes (ignored when the blueprint has a catalog)
    #[arg(long)]
    pub db: Option<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Validate a blueprint configuration
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to blueprint YAML file
    #[arg(short, long)]
    pub file: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Flatten nested task records
#[derive(Debug, Args, Clone)]
pub struct FlattenCommand {
    /// JSON file with one task or an array of tasks
    #[arg(short, long)]
    pub file: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
