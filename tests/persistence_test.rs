use anyhow::Result;
use route_graph::adapters::csv_import;
use route_graph::domain::model::GraphSnapshot;
use route_graph::{EngineOptions, ErrorKind, JsonFileStore, MemoryStore, RouteError, RouteGraph};
use tempfile::TempDir;

#[tokio::test]
async fn test_close_then_open_restores_graph() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("routes.json");

    let graph = RouteGraph::open(JsonFileStore::new(&path), EngineOptions::default()).await?;
    graph.add_airport("JFK", "John F. Kennedy", 1)?;
    graph.add_airport("LAX", "Los Angeles", 2)?;
    graph.add_airport("ORD", "Chicago O'Hare", 3)?;
    graph.add_route("JFK", "LAX", 360)?;
    graph.add_route("LAX", "ORD", 240)?;
    let before = graph.snapshot();
    graph.close().await?;

    let reopened = RouteGraph::open(JsonFileStore::new(&path), EngineOptions::default()).await?;
    assert_eq!(reopened.snapshot(), before);
    assert_eq!(
        reopened.get_route("JFK", "LAX")?.created_at,
        before.routes[0].created_at
    );
    // Reloaded adjacency still guards against cycles.
    assert_eq!(
        reopened.add_route("ORD", "JFK", 60).unwrap_err().kind(),
        ErrorKind::CycleDetected
    );
    Ok(())
}

#[tokio::test]
async fn test_snapshot_with_cycle_is_rejected_on_open() -> Result<()> {
    let json = r#"{
        "airports": [
            {"code": "AAA", "name": "A", "position": 1},
            {"code": "BBB", "name": "B", "position": 2}
        ],
        "routes": [
            {"source": "AAA", "destination": "BBB", "duration": 60, "created_at": "2024-01-01T00:00:00Z"},
            {"source": "BBB", "destination": "AAA", "duration": 60, "created_at": "2024-01-02T00:00:00Z"}
        ]
    }"#;
    let snapshot: GraphSnapshot = serde_json::from_str(json)?;

    let err = match RouteGraph::open(MemoryStore::with_snapshot(snapshot), EngineOptions::default()).await {
        Ok(_) => panic!("snapshot with a cycle must not open"),
        Err(e) => e,
    };
    assert_eq!(err.kind(), ErrorKind::CycleDetected);
    Ok(())
}

#[tokio::test]
async fn test_memory_store_survives_reopen() -> Result<()> {
    let store = MemoryStore::new();
    let graph = RouteGraph::open(store.clone(), EngineOptions::default()).await?;
    graph.add_airport("AAA", "A", 1)?;
    graph.flush().await?;
    assert_eq!(store.current().airports.len(), 1);

    graph.add_airport("BBB", "B", 2)?;
    graph.close().await?;

    let reopened = RouteGraph::open(store, EngineOptions::default()).await?;
    assert_eq!(reopened.stats().airport_count, 2);
    Ok(())
}

#[tokio::test]
async fn test_import_csv_files() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let airports = temp_dir.path().join("airports.csv");
    let routes = temp_dir.path().join("routes.csv");
    std::fs::write(
        &airports,
        "code,name,position\nJFK,John F. Kennedy,1\nLAX,Los Angeles,2\nORD,Chicago O'Hare,3\n",
    )?;
    std::fs::write(
        &routes,
        "source,destination,duration\nJFK,LAX,360\nLAX,ORD,240\nORD,ORD,10\n",
    )?;

    let graph = RouteGraph::open(MemoryStore::new(), EngineOptions::default()).await?;
    let err = csv_import::import_files(&graph, Some(airports.as_path()), Some(routes.as_path())).unwrap_err();
    assert!(matches!(err, RouteError::ImportError { line: 4, .. }));
    assert_eq!(err.kind(), ErrorKind::SelfLoop);

    let stats = graph.stats();
    assert_eq!((stats.airport_count, stats.route_count), (3, 2));
    Ok(())
}

#[tokio::test]
async fn test_open_on_empty_store_starts_blank() -> Result<()> {
    let store = MemoryStore::new();
    let graph = RouteGraph::open(store.clone(), EngineOptions::default()).await?;
    let stats = graph.stats();
    assert_eq!((stats.airport_count, stats.route_count), (0, 0));

    // Closing a blank graph writes an empty snapshot, not an error.
    graph.close().await?;
    assert_eq!(store.current(), GraphSnapshot::default());

    // Airports without routes still make a non-empty snapshot worth replaying.
    let snapshot = GraphSnapshot {
        airports: vec![route_graph::Airport::new("AAA", "A", 1)],
        routes: vec![],
    };
    let graph = RouteGraph::open(MemoryStore::with_snapshot(snapshot), EngineOptions::default()).await?;
    assert_eq!(graph.get_airport("AAA")?.position, 1);
    Ok(())
}
