use crate::core::graph::RouteGraph;
use crate::domain::ports::SnapshotStore;
use crate::utils::error::{Result, RouteError};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct AirportRow {
    code: String,
    name: String,
    position: i64,
}

#[derive(Debug, Deserialize)]
struct RouteRow {
    source: String,
    destination: String,
    duration: i64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub airports: usize,
    pub routes: usize,
}

/// Applies each `code,name,position` row as its own `add_airport` call.
/// Stops at the first failing row; rows before it stay applied.
pub fn import_airports<S: SnapshotStore, R: Read>(graph: &RouteGraph<S>, reader: R) -> Result<usize> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut count = 0;
    for (index, row) in csv_reader.deserialize::<AirportRow>().enumerate() {
        let line = data_line(index);
        let row = row.map_err(|e| at_line(line, e.into()))?;
        graph
            .add_airport(&row.code, &row.name, row.position)
            .map_err(|e| at_line(line, e))?;
        count += 1;
    }
    Ok(count)
}

/// Applies each `source,destination,duration` row as its own `add_route` call.
pub fn import_routes<S: SnapshotStore, R: Read>(graph: &RouteGraph<S>, reader: R) -> Result<usize> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut count = 0;
    for (index, row) in csv_reader.deserialize::<RouteRow>().enumerate() {
        let line = data_line(index);
        let row = row.map_err(|e| at_line(line, e.into()))?;
        graph
            .add_route(&row.source, &row.destination, row.duration)
            .map_err(|e| at_line(line, e))?;
        count += 1;
    }
    Ok(count)
}

/// Airports first so routes can resolve their endpoints.
pub fn import_files<S: SnapshotStore>(
    graph: &RouteGraph<S>,
    airports: Option<&Path>,
    routes: Option<&Path>,
) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();
    if let Some(path) = airports {
        summary.airports = import_airports(graph, std::fs::File::open(path)?)?;
        tracing::info!("📥 Imported {} airport(s) from {}", summary.airports, path.display());
    }
    if let Some(path) = routes {
        summary.routes = import_routes(graph, std::fs::File::open(path)?)?;
        tracing::info!("📥 Imported {} route(s) from {}", summary.routes, path.display());
    }
    Ok(summary)
}

// Header is line 1.
fn data_line(index: usize) -> u64 {
    index as u64 + 2
}

fn at_line(line: u64, source: RouteError) -> RouteError {
    RouteError::ImportError {
        line,
        source: Box::new(source),
    }
}
