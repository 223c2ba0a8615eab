mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use roadgraph_cli::output::OutputFormat;
use roadgraph_lib::GeoPoint;

use commands::route::{handle_route_command, AlgorithmArg, HeuristicArg, RouteCommandArgs};
use commands::stats::handle_stats_command;

#[derive(Parser, Debug)]
#[command(author, version, about = "Road map loading and route planning")]
struct Cli {
    /// Road map file to load.
    #[arg(long, env = "ROADGRAPH_MAP", global = true)]
    map: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a route between two intersections given as `<lat>,<lon>`.
    Route {
        /// Starting intersection.
        #[arg(long = "from", allow_hyphen_values = true)]
        from: GeoPoint,
        /// Destination intersection.
        #[arg(long = "to", allow_hyphen_values = true)]
        to: GeoPoint,
        /// Search algorithm.
        #[arg(long, value_enum, default_value = "a-star")]
        algorithm: AlgorithmArg,
        /// Distance estimate used by A*.
        #[arg(long, value_enum, default_value = "great-circle")]
        heuristic: HeuristicArg,
        /// Give up after expanding this many intersections.
        #[arg(long)]
        max_expansions: Option<usize>,
    },
    /// Print vertex, edge and road type counts for the map.
    Stats,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let map = cli
        .map
        .ok_or_else(|| anyhow::anyhow!("no road map given; pass --map or set ROADGRAPH_MAP"))?;

    match cli.command {
        Command::Route {
            from,
            to,
            algorithm,
            heuristic,
            max_expansions,
        } => {
            let args = RouteCommandArgs {
                from,
                to,
                algorithm,
                heuristic,
                max_expansions,
            };
            handle_route_command(&map, cli.format, &args)
        }
        Command::Stats => handle_stats_command(&map, cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
