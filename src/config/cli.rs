use crate::domain::model::Direction;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "route-graph")]
#[command(about = "Airport route graph: validated routes, nth-node search and duration queries")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Snapshot file, overrides store.path from the config
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Manage airports
    #[command(subcommand)]
    Airport(AirportCommand),

    /// Manage routes
    #[command(subcommand)]
    Route(RouteCommand),

    /// Find the airport N positions left or right of START
    Nth {
        start: String,
        #[arg(value_parser = parse_direction)]
        direction: Direction,
        #[arg(allow_hyphen_values = true)]
        n: i64,
    },

    /// Airports with the longest-duration route
    Longest,

    /// Route(s) with the shortest duration
    Shortest,

    /// Airport and route counts
    Stats,

    /// Bulk load airports and routes from CSV files
    Import {
        #[arg(long)]
        airports: Option<PathBuf>,
        #[arg(long)]
        routes: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct AirportFields {
    pub code: String,
    pub name: String,
    #[arg(allow_hyphen_values = true)]
    pub position: i64,
}

#[derive(Debug, Clone, Subcommand)]
pub enum AirportCommand {
    Add(AirportFields),
    Update(AirportFields),
    Remove { code: String },
    Get { code: String },
    List,
}

#[derive(Debug, Clone, Subcommand)]
pub enum RouteCommand {
    Add {
        source: String,
        destination: String,
        #[arg(allow_hyphen_values = true)]
        duration: i64,
    },
    Remove {
        source: String,
        destination: String,
    },
    List,
    #[command(name = "from")]
    Outgoing { code: String },
    #[command(name = "to")]
    Incoming { code: String },
}

fn parse_direction(value: &str) -> Result<Direction, String> {
    value.parse::<Direction>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nth_command() {
        let config = CliConfig::parse_from(["route-graph", "--store", "x.json", "nth", "jfk", "LEFT", "2"]);
        assert_eq!(config.store, Some(PathBuf::from("x.json")));
        match config.command {
            Command::Nth { start, direction, n } => {
                assert_eq!(start, "jfk");
                assert_eq!(direction, Direction::Left);
                assert_eq!(n, 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_bad_direction_rejected() {
        assert!(CliConfig::try_parse_from(["route-graph", "nth", "JFK", "up", "1"]).is_err());
    }

    #[test]
    fn test_parse_route_add() {
        let config = CliConfig::parse_from(["route-graph", "route", "add", "JFK", "LAX", "360", "-v"]);
        assert!(config.verbose);
        assert!(matches!(
            config.command,
            Command::Route(RouteCommand::Add { duration: 360, .. })
        ));
    }
}
