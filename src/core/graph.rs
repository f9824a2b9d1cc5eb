use crate::config::EngineOptions;
use crate::core::registry::AirportRegistry;
use crate::core::route_store::RouteStore;
use crate::core::{extremum, traversal};
use crate::domain::model::{
    Airport, Direction, GraphSnapshot, GraphStats, LongestDurationEntry, NthNodeResult, Route,
};
use crate::domain::ports::SnapshotStore;
use crate::utils::error::{Result, RouteError};
use crate::utils::validation;
use chrono::{DateTime, Utc};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug)]
struct GraphState {
    registry: AirportRegistry,
    routes: RouteStore,
}

/// The route graph engine: airport registry and route store behind one
/// reader/writer lock, persisted through a [`SnapshotStore`].
///
/// Mutations hold the write lock for the whole validate-then-commit step,
/// so cycle checks never race a concurrent insert. Queries hold the read
/// lock and return owned values.
pub struct RouteGraph<S: SnapshotStore> {
    state: RwLock<GraphState>,
    store: S,
    options: EngineOptions,
}

impl<S: SnapshotStore> RouteGraph<S> {
    /// Loads the persisted snapshot, replaying every record through the
    /// same validation as live mutations.
    pub async fn open(store: S, options: EngineOptions) -> Result<Self> {
        let snapshot = store.load().await?;
        let graph = Self {
            state: RwLock::new(GraphState {
                registry: AirportRegistry::new(options.unique_positions),
                routes: RouteStore::new(),
            }),
            store,
            options,
        };
        graph.restore(snapshot)?;

        let stats = graph.stats();
        tracing::info!(
            "📂 Route graph opened: {} airport(s), {} route(s)",
            stats.airport_count,
            stats.route_count
        );
        Ok(graph)
    }

    pub async fn flush(&self) -> Result<()> {
        let snapshot = self.snapshot();
        self.store.save(&snapshot).await?;
        tracing::debug!(
            "Snapshot saved: {} airport(s), {} route(s)",
            snapshot.airports.len(),
            snapshot.routes.len()
        );
        Ok(())
    }

    pub async fn close(self) -> Result<()> {
        self.flush().await?;
        tracing::info!("💾 Route graph closed");
        Ok(())
    }

    fn restore(&self, snapshot: GraphSnapshot) -> Result<()> {
        if snapshot.is_empty() {
            tracing::debug!("Snapshot store is empty, starting with a blank graph");
            return Ok(());
        }
        for airport in snapshot.airports {
            self.add_airport(&airport.code, &airport.name, airport.position)?;
        }
        for route in snapshot.routes {
            self.insert_route(&route.source, &route.destination, route.duration, route.created_at)?;
        }
        Ok(())
    }

    /// Airports by position, routes oldest first.
    pub fn snapshot(&self) -> GraphSnapshot {
        let state = self.read();
        let mut routes: Vec<Route> = state.routes.iter().cloned().collect();
        routes.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.key().cmp(&b.key()))
        });
        GraphSnapshot {
            airports: state.registry.list_by_position(),
            routes,
        }
    }

    pub fn add_airport(&self, code: &str, name: &str, position: i64) -> Result<Airport> {
        let code = validation::normalize_code(code, self.options.code_length)?;
        let name = validation::validate_airport_name(name, self.options.max_name_length)?;
        let airport = Airport::new(code, name, position);

        self.write()
            .registry
            .add_airport(airport.clone())
            .inspect_err(|e| tracing::warn!("Rejected airport {}: {}", airport.code, e))?;

        tracing::info!("✈️  Airport {} added at position {}", airport, airport.position);
        Ok(airport)
    }

    /// Changes the non-key fields of an airport.
    pub fn update_airport(&self, code: &str, name: &str, position: i64) -> Result<Airport> {
        let code = lookup_code(code);
        let name = validation::validate_airport_name(name, self.options.max_name_length)?;

        let airport = self
            .write()
            .registry
            .update_airport(&code, name, position)
            .inspect_err(|e| tracing::warn!("Rejected update of airport {}: {}", code, e))?;

        tracing::info!("Airport {} updated, position {}", airport, airport.position);
        Ok(airport)
    }

    pub fn get_airport(&self, code: &str) -> Result<Airport> {
        self.read().registry.get_airport(&lookup_code(code)).cloned()
    }

    pub fn list_by_position(&self) -> Vec<Airport> {
        self.read().registry.list_by_position()
    }

    pub fn remove_airport(&self, code: &str) -> Result<Airport> {
        let code = lookup_code(code);
        let mut state = self.write();
        state.registry.get_airport(&code)?;

        let route_count = state.routes.reference_count(&code);
        if route_count > 0 {
            let err = RouteError::Conflict { code, route_count };
            tracing::warn!("{}", err);
            return Err(err);
        }

        let airport = state.registry.remove_airport(&code)?;
        tracing::info!("🗑️  Airport {} removed", airport);
        Ok(airport)
    }

    pub fn add_route(&self, source: &str, destination: &str, duration: i64) -> Result<Route> {
        self.insert_route(source, destination, duration, Utc::now())
    }

    fn insert_route(
        &self,
        source: &str,
        destination: &str,
        duration: i64,
        created_at: DateTime<Utc>,
    ) -> Result<Route> {
        let source = lookup_code(source);
        let destination = lookup_code(destination);

        let mut state = self.write();
        for code in [&source, &destination] {
            if !state.registry.contains(code) {
                return Err(RouteError::airport_not_found(code));
            }
        }

        let route = state
            .routes
            .add_route(&source, &destination, duration, created_at)
            .inspect_err(|e| tracing::warn!("Rejected route {} -> {}: {}", source, destination, e))?;

        tracing::info!("🛫 Route {} added", route);
        Ok(route)
    }

    pub fn remove_route(&self, source: &str, destination: &str) -> Result<Route> {
        let route = self
            .write()
            .routes
            .remove_route(&lookup_code(source), &lookup_code(destination))?;
        tracing::info!("🗑️  Route {} removed", route);
        Ok(route)
    }

    pub fn get_route(&self, source: &str, destination: &str) -> Result<Route> {
        self.read()
            .routes
            .get_route(&lookup_code(source), &lookup_code(destination))
            .cloned()
    }

    pub fn routes_from(&self, code: &str) -> Result<Vec<Route>> {
        let code = lookup_code(code);
        let state = self.read();
        state.registry.get_airport(&code)?;
        Ok(state.routes.routes_from(&code))
    }

    pub fn routes_to(&self, code: &str) -> Result<Vec<Route>> {
        let code = lookup_code(code);
        let state = self.read();
        state.registry.get_airport(&code)?;
        Ok(state.routes.routes_to(&code))
    }

    pub fn list_routes(&self) -> Vec<Route> {
        self.read().routes.list_routes()
    }

    pub fn find_nth_node(&self, start: &str, direction: Direction, n: i64) -> Result<NthNodeResult> {
        traversal::find_nth_node(&self.read().registry, &lookup_code(start), direction, n)
    }

    pub fn longest_duration_airports(&self) -> Result<Vec<LongestDurationEntry>> {
        let state = self.read();
        extremum::longest_duration_airports(&state.registry, &state.routes, self.options.longest_scope)
    }

    pub fn shortest_route(&self) -> Result<Vec<Route>> {
        extremum::shortest_route(&self.read().routes)
    }

    pub fn stats(&self) -> GraphStats {
        let state = self.read();
        GraphStats {
            airport_count: state.registry.len(),
            route_count: state.routes.len(),
        }
    }

    // Every mutation validates before it writes, so a panic while the lock
    // was held cannot have left a half-applied change behind.
    fn read(&self) -> RwLockReadGuard<'_, GraphState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, GraphState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Normalises a code for lookup only; unknown or malformed codes surface
/// as `NotFound` from the registry.
fn lookup_code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}
