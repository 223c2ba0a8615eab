//! Output formatting for route and graph statistics rendering.

use std::io::{self, Write};

use clap::ValueEnum;
use roadgraph_lib::{GraphStats, RouteRenderMode, RouteSummary};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Header plus one annotated line per step.
    #[default]
    Text,
    /// Coordinates only, prefixed `+`, `|` and `-`.
    Basic,
    /// Pretty-printed JSON.
    Json,
}

/// Write a route summary to `out` in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn write_route<W: Write>(
    out: &mut W,
    summary: &RouteSummary,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => out.write_all(summary.render(RouteRenderMode::PlainText).as_bytes()),
        OutputFormat::Basic => out.write_all(summary.render(RouteRenderMode::Basic).as_bytes()),
        OutputFormat::Json => write_json(out, summary),
    }
}

/// Write graph statistics to `out` in the requested format.
///
/// `basic` prints only the two counts.
pub fn write_stats<W: Write>(
    out: &mut W,
    stats: &GraphStats,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(out, stats),
        OutputFormat::Basic => writeln!(out, "{} {}", stats.vertices, stats.edges),
        OutputFormat::Text => {
            writeln!(out, "Vertices: {}", stats.vertices)?;
            writeln!(out, "Edges: {}", stats.edges)?;
            if !stats.road_types.is_empty() {
                writeln!(out, "Road types:")?;
                for (road_type, count) in &stats.road_types {
                    writeln!(out, " - {road_type}: {count}")?;
                }
            }
            Ok(())
        }
    }
}

fn write_json<W: Write, T: serde::Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::other)?;
    out.write_all(b"\n")
}
