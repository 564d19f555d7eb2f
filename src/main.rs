use anyhow::{Context, Result};
use blueprint::cli::commands::{FlattenCommand, PlanCommand, ValidateCommand};
use blueprint::cli::output::*;
use blueprint::cli::{Cli, Command};
use blueprint::collection::{flatten, TaskRecord};
use blueprint::core::config::BlueprintConfig;
use blueprint::persistence::InMemoryScopeStore;
use blueprint::planning::BlueprintPlanner;
use blueprint::plugin;
use std::sync::Arc;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Execute command
    match &cli.command {
        Command::Plan(cmd) => plan_blueprint(cmd).await?,
        Command::Validate(cmd) => validate_blueprint(cmd)?,
        Command::Flatten(cmd) => flatten_tasks(cmd)?,
    }

    Ok(())
}

/// Register every built-in data source with the store holding its scopes
async fn build_planner(config: &BlueprintConfig, db: Option<&str>) -> Result<BlueprintPlanner> {
    let mut planner = BlueprintPlanner::new();

    if config.has_catalog() {
        for name in plugin::builtin_names() {
            let store = match config.catalog.get(*name) {
                Some(catalog) => InMemoryScopeStore::from_catalog(catalog).await,
                None => InMemoryScopeStore::new(),
            };
            if let Some(source) = plugin::builtin(name) {
                planner.register(source, Arc::new(store));
            }
        }
        return Ok(planner);
    }

    register_sqlite_stores(&mut planner, db).await?;
    Ok(planner)
}

#[cfg(feature = "sqlite")]
async fn register_sqlite_stores(planner: &mut BlueprintPlanner, db: Option<&str>) -> Result<()> {
    use blueprint::persistence::{ScopeStore, SqliteScopeStore};

    let names = plugin::builtin_names();
    let base = match db {
        Some(path) => SqliteScopeStore::new(path, names[0]).await?,
        None => SqliteScopeStore::with_default_path(names[0]).await?,
    };
    for name in names {
        if let Some(source) = plugin::builtin(name) {
            let store: Arc<dyn ScopeStore> = Arc::new(base.for_plugin(name));
            planner.register(source, store);
        }
    }
    Ok(())
}

#[cfg(not(feature = "sqlite"))]
async fn register_sqlite_stores(_planner: &mut BlueprintPlanner, _db: Option<&str>) -> Result<()> {
    anyhow::bail!("Blueprint has no catalog and sqlite support is disabled")
}

async fn plan_blueprint(cmd: &PlanCommand) -> Result<()> {
    let config = BlueprintConfig::from_file(&cmd.file).context("Failed to load blueprint")?;

    if !cmd.json {
        println!("{} Loaded blueprint: {}", INFO, style(&config.name).bold());
    }

    let planner = build_planner(&config, cmd.db.as_deref()).await?;
    let result = match planner.plan(&config).await {
        Ok(result) => result,
        Err(e) => {
            println!("{} {} {}", CROSS, style(&config.name).bold(), style("failed").red());
            error!("{}", e);
            std::process::exit(1);
        }
    };

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    print!("{}", format_plan(&result.plan));

    if result.scopes.is_empty() {
        println!("\n{} No domain scopes enabled", WARN);
    } else {
        println!("\n{} Domain scopes:", INFO);
        for scope in &result.scopes {
            println!("  {}", format_domain_scope(scope));
        }
    }

    println!(
        "\n{} {} compiled {}",
        CHECK,
        style(&config.name).bold(),
        style("successfully").green()
    );
    Ok(())
}

fn validate_blueprint(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating blueprint...", INFO);

    match BlueprintConfig::from_file(&cmd.file) {
        Ok(config) => {
            println!("{} Blueprint configuration is valid!", CHECK);
            println!("  Name: {}", style(&config.name).bold());
            println!("  Connections: {}", style(config.connections.len()).cyan());
            println!("  Scopes: {}", style(config.scope_count()).cyan());

            if cmd.json {
                let json = serde_json::to_string_pretty(&config)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(e).red());
            std::process::exit(1);
        }
    }
}

fn flatten_tasks(cmd: &FlattenCommand) -> Result<()> {
    let content = std::fs::read_to_string(&cmd.file)
        .with_context(|| format!("Failed to read {}", cmd.file))?;
    let value: serde_json::Value = serde_json::from_str(&content).context("Invalid JSON")?;
    let roots: Vec<TaskRecord> = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };

    let mut flattened = Vec::new();
    for root in &roots {
        let records = flatten(root).with_context(|| format!("Failed to flatten task {}", root.id))?;
        flattened.extend(records);
    }

    if cmd.json {
        let rows: Vec<serde_json::Value> = flattened
            .iter()
            .map(|task| {
                serde_json::json!({
                    "id": task.id,
                    "name": task.name,
                    "children": task.children.iter().map(|c| c.id).collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{} {} tasks flattened", INFO, style(flattened.len()).cyan());
    for task in &flattened {
        println!("  {}", format_task_record(task));
    }
    Ok(())
}
