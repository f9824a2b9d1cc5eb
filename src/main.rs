use clap::Parser;
use route_graph::config::cli::{AirportCommand, AirportFields, Command, RouteCommand};
use route_graph::utils::error::ErrorSeverity;
use route_graph::utils::{logger, validation::Validate};
use route_graph::{CliConfig, JsonFileStore, Result, Route, RouteGraph, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入配置，未指定時使用預設值
    let config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path.display(), e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => TomlConfig::default(),
    };

    // 初始化日誌
    let verbose = cli.verbose || config.verbose();
    if cli.json_logs || config.json_logs() {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }
    tracing::debug!("CLI args: {:?}", cli);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let store_path = cli
        .store
        .clone()
        .unwrap_or_else(|| config.store_path().into());
    tracing::debug!("Using snapshot store at {}", store_path.display());

    if let Err(e) = run(&cli.command, JsonFileStore::new(store_path), &config).await {
        tracing::error!(
            "❌ Command failed: {} (Kind: {:?}, Severity: {:?})",
            e,
            e.kind(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,      // 空結果，不算失敗
            ErrorSeverity::Medium => 2,   // 查無資料
            ErrorSeverity::High => 1,     // 驗證失敗
            ErrorSeverity::Critical => 3, // 儲存錯誤
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(command: &Command, store: JsonFileStore, config: &TomlConfig) -> Result<()> {
    let graph = RouteGraph::open(store, config.engine_options()).await?;

    let mutated = match command {
        Command::Airport(cmd) => airport_command(&graph, cmd)?,
        Command::Route(cmd) => route_command(&graph, cmd)?,
        Command::Nth { start, direction, n } => {
            let result = graph.find_nth_node(start, *direction, *n)?;
            println!(
                "{} is {} position(s) {} of {} (#{} → #{})",
                result.target,
                result.n,
                result.direction,
                result.start.code,
                result.start_index + 1,
                result.target_index + 1
            );
            false
        }
        Command::Longest => {
            let entries = graph.longest_duration_airports()?;
            if let Some(first) = entries.first() {
                println!("Longest route duration: {} min", first.route.duration);
            }
            for entry in &entries {
                println!("  {}  via {}", entry.airport, entry.route);
            }
            false
        }
        Command::Shortest => {
            let routes = graph.shortest_route()?;
            if let Some(first) = routes.first() {
                println!("Shortest route duration: {} min", first.duration);
            }
            print_routes(&routes);
            false
        }
        Command::Stats => {
            let stats = graph.stats();
            println!("Airports: {}", stats.airport_count);
            println!("Routes:   {}", stats.route_count);
            false
        }
        Command::Import { airports, routes } => {
            let summary = route_graph::adapters::csv_import::import_files(
                &graph,
                airports.as_deref(),
                routes.as_deref(),
            );
            // Rows applied before a failure are kept, so persist either way.
            graph.flush().await?;
            let summary = summary?;
            println!(
                "✅ Imported {} airport(s) and {} route(s)",
                summary.airports, summary.routes
            );
            false
        }
    };

    if mutated {
        graph.close().await?;
    }
    Ok(())
}

fn airport_command(graph: &RouteGraph<JsonFileStore>, cmd: &AirportCommand) -> Result<bool> {
    match cmd {
        AirportCommand::Add(AirportFields { code, name, position }) => {
            let airport = graph.add_airport(code, name, *position)?;
            println!("✅ Airport {} added at position {}", airport, airport.position);
            Ok(true)
        }
        AirportCommand::Update(AirportFields { code, name, position }) => {
            let airport = graph.update_airport(code, name, *position)?;
            println!("✅ Airport {} now at position {}", airport, airport.position);
            Ok(true)
        }
        AirportCommand::Remove { code } => {
            let airport = graph.remove_airport(code)?;
            println!("✅ Airport {} deleted", airport);
            Ok(true)
        }
        AirportCommand::Get { code } => {
            let airport = graph.get_airport(code)?;
            println!("{}  (position {})", airport, airport.position);
            Ok(false)
        }
        AirportCommand::List => {
            for airport in graph.list_by_position() {
                println!("{:>5}  {}", airport.position, airport);
            }
            Ok(false)
        }
    }
}

fn route_command(graph: &RouteGraph<JsonFileStore>, cmd: &RouteCommand) -> Result<bool> {
    match cmd {
        RouteCommand::Add {
            source,
            destination,
            duration,
        } => {
            let route = graph.add_route(source, destination, *duration)?;
            println!("✅ Route {} added", route);
            Ok(true)
        }
        RouteCommand::Remove {
            source,
            destination,
        } => {
            let route = graph.remove_route(source, destination)?;
            println!("✅ Route {} deleted", route);
            Ok(true)
        }
        RouteCommand::List => {
            print_routes(&graph.list_routes());
            Ok(false)
        }
        RouteCommand::Outgoing { code } => {
            print_routes(&graph.routes_from(code)?);
            Ok(false)
        }
        RouteCommand::Incoming { code } => {
            print_routes(&graph.routes_to(code)?);
            Ok(false)
        }
    }
}

fn print_routes(routes: &[Route]) {
    if routes.is_empty() {
        println!("(no routes)");
    }
    for route in routes {
        println!(
            "  {}  created {}",
            route,
            route.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
}

