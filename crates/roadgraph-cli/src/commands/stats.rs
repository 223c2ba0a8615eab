//! Stats command handler for summarising a loaded road map.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use roadgraph_cli::output::{write_stats, OutputFormat};
use roadgraph_lib::load_road_map;

/// Handle the stats subcommand.
pub fn handle_stats_command(map: &Path, format: OutputFormat) -> Result<()> {
    let graph = load_road_map(map)
        .with_context(|| format!("failed to load road map from {}", map.display()))?;
    write_stats(&mut io::stdout().lock(), &graph.stats(), format)
        .context("failed to write graph statistics")
}
