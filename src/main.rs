use std::error::Error as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use roadroute::config::CONFIG_ENV;
use roadroute::report::to_json;
use roadroute::{
    AppConfig, CliError, Coordinate, Endpoint, GraphOverrides, LoadedNetwork, RouteRequest,
    reach, route,
};
use roadroute_core::{CostMode, NodeId, SourceFormat};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(
    name = "roadroute",
    version,
    about = "Shortest paths on road networks",
    disable_help_subcommand = true
)]
struct Cli {
    #[arg(long, global = true, env = CONFIG_ENV, value_name = "FILE", help = "TOML configuration file")]
    config: Option<PathBuf>,

    #[arg(long, global = true, value_name = "FILE", help = "Node table (binary or CSV)")]
    nodes: Option<PathBuf>,

    #[arg(long, global = true, value_name = "FILE", help = "Edge table (binary or CSV)")]
    edges: Option<PathBuf>,

    #[arg(long, global = true, value_enum, help = "Table format, inferred from the node file extension if absent")]
    format: Option<FormatArg>,

    #[arg(long, global = true, value_name = "FILTER", help = "Log filter, e.g. 'debug' or 'roadroute_core=trace'")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shortest path between two nodes
    Route(RouteCmd),
    /// Costs from one node to every reachable node
    Reach(ReachCmd),
    /// Graph statistics
    Info {
        #[arg(long, help = "Print JSON instead of text")]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct RouteCmd {
    #[arg(long, value_name = "ID", required_unless_present = "from_coord", conflicts_with = "from_coord")]
    from: Option<NodeId>,

    #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
    from_coord: Option<String>,

    #[arg(long, value_name = "ID", required_unless_present = "to_coord", conflicts_with = "to_coord")]
    to: Option<NodeId>,

    #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
    to_coord: Option<String>,

    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    #[arg(long, value_name = "FILE", help = "Write the path as a GPX track")]
    gpx: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "Write the path as a GeoJSON feature")]
    geojson: Option<PathBuf>,

    #[arg(long, help = "Print JSON instead of text")]
    json: bool,
}

#[derive(Args, Debug)]
struct ReachCmd {
    #[arg(long, value_name = "ID", required_unless_present = "from_coord", conflicts_with = "from_coord")]
    from: Option<NodeId>,

    #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
    from_coord: Option<String>,

    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    #[arg(long, help = "Print JSON instead of text")]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    #[value(alias = "shortest")]
    Distance,
    #[value(alias = "fastest")]
    Time,
}

impl From<ModeArg> for CostMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Distance => CostMode::Distance,
            ModeArg::Time => CostMode::Time,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Binary,
    Csv,
}

impl From<FormatArg> for SourceFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Binary => SourceFormat::Binary,
            FormatArg::Csv => SourceFormat::Csv,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error[{}]: {err}", err.kind().code());
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let env_filter = std::env::var("RUST_LOG").ok();
    init_logging(&config.log_filter(cli.log_level.as_deref(), env_filter.as_deref()))?;

    let source = config.graph_source(&GraphOverrides {
        nodes: cli.nodes,
        edges: cli.edges,
        format: cli.format.map(SourceFormat::from),
    })?;
    let network = LoadedNetwork::open(&source)?;
    let graph = network.graph();

    match cli.command {
        Command::Route(cmd) => {
            let request = RouteRequest {
                from: endpoint(cmd.from, cmd.from_coord.as_deref())?,
                to: endpoint(cmd.to, cmd.to_coord.as_deref())?,
                mode: config.mode(cmd.mode.map(CostMode::from)),
                gpx: cmd.gpx.or_else(|| config.output.gpx.clone()),
                geojson: cmd.geojson.or_else(|| config.output.geojson.clone()),
            };
            let summary = route(graph, &request)?;
            if cmd.json {
                println!("{}", to_json(&summary)?);
            } else {
                print!("{summary}");
            }
        }
        Command::Reach(cmd) => {
            let from = endpoint(cmd.from, cmd.from_coord.as_deref())?;
            let summary = reach(graph, from, config.mode(cmd.mode.map(CostMode::from)))?;
            if cmd.json {
                println!("{}", to_json(&summary)?);
            } else {
                print!("{summary}");
            }
        }
        Command::Info { json } => {
            let summary = network.summary();
            if json {
                println!("{}", to_json(&summary)?);
            } else {
                print!("{summary}");
            }
        }
    }
    Ok(())
}

fn endpoint(id: Option<NodeId>, coordinate: Option<&str>) -> Result<Endpoint, CliError> {
    match (id, coordinate) {
        (Some(id), _) => Ok(Endpoint::Id(id)),
        (None, Some(text)) => Ok(Endpoint::Coordinate(text.parse::<Coordinate>()?)),
        (None, None) => Err(CliError::Input(
            "an endpoint needs a node id or a coordinate".to_string(),
        )),
    }
}

fn init_logging(filter: &str) -> Result<(), CliError> {
    fmt()
        .with_env_filter(
            EnvFilter::try_new(filter)
                .map_err(|e| CliError::Config(format!("invalid log level '{filter}': {e}")))?,
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| CliError::Config(format!("logging already initialized: {e}")))
}
