//! Magpie - MCP server for Magic UI components
//!
//! Usage:
//!   magpie              # Serve MCP over stdio (default)
//!   magpie list         # Print the component registry
//!   magpie show <path>  # Print one component file
//!   magpie cache        # Show cache location and freshness

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use magpie_core::cache::{CacheStatus, CacheStore};
use magpie_core::config::{ConfigStore, MagpieConfig, ResolvedConfig};
use magpie_core::context::AppContext;

#[derive(Parser)]
#[command(name = "magpie", version)]
#[command(about = "MCP server for Magic UI components", long_about = None)]
struct Cli {
    /// Path to magpie.toml (defaults to the user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding the registry cache
    #[arg(long, global = true, value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// GitHub token for authenticated API requests
    #[arg(long, global = true, value_name = "TOKEN")]
    github_token: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the component tools over stdio
    Serve,

    /// Print every registry record as JSON
    List,

    /// Print the source of a component file
    Show {
        /// Repository path, e.g. components/alert/alert.tsx
        path: String,
    },

    /// Show cache location and freshness
    Cache {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol stream, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "magpie=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_serve(config).await,
        Commands::List => run_list(config).await,
        Commands::Show { path } => run_show(config, &path).await,
        Commands::Cache { format } => run_cache(config, format),
    }
}

/// File, then environment, then flags.
fn load_config(cli: &Cli) -> Result<ResolvedConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            ConfigStore::from_path(path.clone()).load()?
        }
        None => match ConfigStore::from_default_location() {
            Ok(store) => store.load()?,
            Err(e) => {
                tracing::debug!(error = %e, "No config location, using defaults");
                MagpieConfig::default()
            }
        },
    };

    config.apply_env(|key| std::env::var(key).ok());

    if let Some(dir) = &cli.cache_dir {
        config.cache_dir = Some(dir.clone());
    }
    if let Some(token) = &cli.github_token {
        config.github_token = Some(token.clone());
    }

    config.validate()?;

    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    Ok(config.resolve(&cwd))
}

async fn run_serve(config: ResolvedConfig) -> Result<()> {
    let context = AppContext::new(config)?;

    tracing::info!("Loading components...");
    let server = context.mcp_server().await;
    tracing::info!(
        source = %server.tools().registry().source(),
        "Serving MCP over stdio"
    );

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    server.serve(stdin, tokio::io::stdout()).await
}

async fn run_list(config: ResolvedConfig) -> Result<()> {
    let context = AppContext::new(config)?;
    let tools = context.load_tools().await;
    println!("{}", tools.get_all_components().joined_text());
    Ok(())
}

async fn run_show(config: ResolvedConfig, path: &str) -> Result<()> {
    let context = AppContext::new(config)?;
    let response = context.load_tools().await.get_component_by_path(path).await;
    if response.is_error {
        anyhow::bail!("{}", response.joined_text());
    }
    println!("{}", response.joined_text());
    Ok(())
}

fn run_cache(config: ResolvedConfig, format: OutputFormat) -> Result<()> {
    let status = CacheStore::new(config.cache_dir).status();
    match format {
        OutputFormat::Table => print_cache_table(&status),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "path": status.path,
                "exists": status.exists,
                "fresh": status.fresh,
                "age_seconds": status.age.map(|age| age.as_secs()),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn print_cache_table(status: &CacheStatus) {
    println!("Cache file: {}", status.path.display());
    if !status.exists {
        println!("Status:     missing");
        return;
    }
    let state = if status.fresh { "fresh" } else { "stale" };
    println!("Status:     {state}");
    if let Some(age) = status.age {
        println!("Age:        {}", format_age(age));
    }
}

fn format_age(age: Duration) -> String {
    let secs = age.as_secs();
    let (hours, minutes) = (secs / 3600, (secs % 3600) / 60);
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        format!("{secs}s")
    }
}
