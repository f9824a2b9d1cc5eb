use crate::domain::model::{Route, RouteKey};
use crate::utils::error::{Result, RouteError};
use crate::utils::validation;
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};

pub use crate::utils::validation::Adjacency;

/// Owns every route plus the outgoing/incoming adjacency index.
///
/// Both indexes are only touched by `commit` and `remove_route`, after all
/// checks have passed, so they always agree with `routes`.
#[derive(Debug, Default, Clone)]
pub struct RouteStore {
    routes: HashMap<RouteKey, Route>,
    outgoing: Adjacency,
    incoming: Adjacency,
}

impl RouteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the edge invariants in order: self-loop, duplicate, cycle, duration.
    /// Endpoint existence is resolved by the caller against the registry.
    pub fn validate_new_route(&self, source: &str, destination: &str, duration: i64) -> Result<()> {
        validation::check_self_loop(source, destination)?;
        validation::check_duplicate_route(&self.outgoing, source, destination)?;
        validation::check_acyclic(&self.outgoing, source, destination)?;
        validation::check_duration(duration)?;
        Ok(())
    }

    pub fn add_route(
        &mut self,
        source: &str,
        destination: &str,
        duration: i64,
        created_at: DateTime<Utc>,
    ) -> Result<Route> {
        self.validate_new_route(source, destination, duration)?;
        let route = Route {
            source: source.to_string(),
            destination: destination.to_string(),
            duration,
            created_at,
        };
        self.commit(route.clone());
        Ok(route)
    }

    fn commit(&mut self, route: Route) {
        self.outgoing
            .entry(route.source.clone())
            .or_default()
            .insert(route.destination.clone());
        self.incoming
            .entry(route.destination.clone())
            .or_default()
            .insert(route.source.clone());
        self.routes.insert(route.key(), route);
    }

    pub fn remove_route(&mut self, source: &str, destination: &str) -> Result<Route> {
        let route = self
            .routes
            .remove(&RouteKey::new(source, destination))
            .ok_or_else(|| RouteError::route_not_found(source, destination))?;

        detach(&mut self.outgoing, source, destination);
        detach(&mut self.incoming, destination, source);
        Ok(route)
    }

    pub fn get_route(&self, source: &str, destination: &str) -> Result<&Route> {
        self.routes
            .get(&RouteKey::new(source, destination))
            .ok_or_else(|| RouteError::route_not_found(source, destination))
    }

    /// Outgoing routes ordered by destination code.
    pub fn routes_from(&self, code: &str) -> Vec<Route> {
        self.outgoing
            .get(code)
            .into_iter()
            .flatten()
            .filter_map(|dest| self.routes.get(&RouteKey::new(code, dest)))
            .cloned()
            .collect()
    }

    /// Incoming routes ordered by source code.
    pub fn routes_to(&self, code: &str) -> Vec<Route> {
        self.incoming
            .get(code)
            .into_iter()
            .flatten()
            .filter_map(|src| self.routes.get(&RouteKey::new(src, code)))
            .cloned()
            .collect()
    }

    pub fn reference_count(&self, code: &str) -> usize {
        let out = self.outgoing.get(code).map_or(0, BTreeSet::len);
        let inc = self.incoming.get(code).map_or(0, BTreeSet::len);
        out + inc
    }

    /// Newest first, ties by source then destination.
    pub fn list_routes(&self) -> Vec<Route> {
        let mut routes: Vec<Route> = self.routes.values().cloned().collect();
        routes.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.key().cmp(&b.key()))
        });
        routes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> + '_ {
        self.routes.values()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn detach(index: &mut Adjacency, key: &str, other: &str) {
    if let Some(set) = index.get_mut(key) {
        set.remove(other);
        if set.is_empty() {
            index.remove(key);
        }
    }
}
