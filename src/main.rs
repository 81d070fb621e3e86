//! tabular-view CLI
//!
//! Runs the normalization pipeline over a JSON request file and prints the
//! render payload for one window as JSON.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tabular_view::{ColumnsSpec, SortRequest, Table, TableConfig, TableData, TotalValues};
use tracing_subscriber::EnvFilter;

/// Normalize tables into typed, sortable, windowed render payloads
#[derive(Parser)]
#[command(name = "tabular-view")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one window of a table request
    Render {
        /// Request file: {"data": ..., "columns": ..., "controls": ..., "totals": ...}
        request: PathBuf,
        /// Table config file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// First view position of the window
        #[arg(long)]
        start: Option<usize>,
        /// End of the window (exclusive)
        #[arg(long)]
        end: Option<usize>,
    },
}

#[derive(Deserialize)]
struct Request {
    data: Value,
    #[serde(default)]
    columns: Value,
    #[serde(default)]
    controls: SortRequest,
    #[serde(default)]
    totals: Option<TotalValues>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render {
            request,
            config,
            start,
            end,
        } => cmd_render(&request, config.as_deref(), start, end),
    }
}

fn cmd_render(
    request_path: &Path,
    config_path: Option<&Path>,
    start: Option<usize>,
    end: Option<usize>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => TableConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => TableConfig::default(),
    };

    let content = std::fs::read_to_string(request_path)
        .with_context(|| format!("failed to read {}", request_path.display()))?;
    let request: Request = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", request_path.display()))?;

    let data = TableData::from_value(request.data).context("invalid table data")?;
    let columns = ColumnsSpec::from_value(&request.columns).context("invalid columns spec")?;

    let mut table = Table::new(data, &columns, config)?;
    table.set_sort(request.controls);
    table.set_totals(request.totals);

    let payload = match (start, end) {
        (None, None) => table.render_visible(&table.scroll_state()),
        (start, end) => table.render(start.unwrap_or(0)..end.unwrap_or(table.row_count())),
    };
    tracing::info!(
        rows = payload.visible_len(),
        start = payload.start,
        length = payload.length,
        "rendered window"
    );

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
