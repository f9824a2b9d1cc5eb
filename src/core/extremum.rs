use crate::core::registry::AirportRegistry;
use crate::core::route_store::RouteStore;
use crate::domain::model::{LongestDurationEntry, Route, RouteScope};
use crate::utils::error::{Result, RouteError};
use std::collections::HashMap;

/// Every airport whose longest route (within `scope`) ties for the global
/// maximum duration, paired with each of its routes of that duration.
///
/// Ordered by airport position/code, then route source/destination.
pub fn longest_duration_airports(
    registry: &AirportRegistry,
    store: &RouteStore,
    scope: RouteScope,
) -> Result<Vec<LongestDurationEntry>> {
    if store.is_empty() {
        return Err(RouteError::EmptyGraph);
    }

    // Per-airport maximum and the routes achieving it.
    let mut best: HashMap<&str, (i64, Vec<&Route>)> = HashMap::new();
    for route in store.iter() {
        let mut endpoints = Vec::with_capacity(2);
        if scope.includes_outgoing() {
            endpoints.push(route.source.as_str());
        }
        if scope.includes_incoming() {
            endpoints.push(route.destination.as_str());
        }
        for code in endpoints {
            let entry = best.entry(code).or_insert((route.duration, Vec::new()));
            if route.duration > entry.0 {
                *entry = (route.duration, Vec::new());
            }
            if route.duration == entry.0 {
                entry.1.push(route);
            }
        }
    }

    let Some(global_max) = best.values().map(|(max, _)| *max).max() else {
        return Err(RouteError::EmptyGraph);
    };

    let mut result = Vec::new();
    for airport in registry.iter_by_position() {
        let Some((max, routes)) = best.get(airport.code.as_str()) else {
            continue;
        };
        if *max != global_max {
            continue;
        }
        let mut routes = routes.clone();
        routes.sort_by_key(|r| r.key());
        result.extend(routes.into_iter().map(|route| LongestDurationEntry {
            airport: airport.clone(),
            route: route.clone(),
        }));
    }

    tracing::debug!(
        "Longest duration {} min shared by {} airport/route pair(s)",
        global_max,
        result.len()
    );
    Ok(result)
}

/// All routes sharing the global minimum duration, by source then destination.
pub fn shortest_route(store: &RouteStore) -> Result<Vec<Route>> {
    let min = store
        .iter()
        .map(|r| r.duration)
        .min()
        .ok_or(RouteError::EmptyGraph)?;

    let mut routes: Vec<Route> = store
        .iter()
        .filter(|r| r.duration == min)
        .cloned()
        .collect();
    routes.sort_by_key(Route::key);

    tracing::debug!("Shortest duration {} min across {} route(s)", min, routes.len());
    Ok(routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Airport;
    use crate::utils::error::ErrorKind;
    use chrono::Utc;

    fn build(edges: &[(&str, &str, i64)]) -> (AirportRegistry, RouteStore) {
        let mut registry = AirportRegistry::new(false);
        for (i, code) in ["A", "B", "C", "D", "E"].iter().enumerate() {
            registry
                .add_airport(Airport::new(*code, *code, i as i64 + 1))
                .unwrap();
        }
        let mut store = RouteStore::new();
        for (from, to, duration) in edges {
            store.add_route(from, to, *duration, Utc::now()).unwrap();
        }
        (registry, store)
    }

    fn pairs(entries: &[LongestDurationEntry]) -> Vec<(String, String, String)> {
        entries
            .iter()
            .map(|e| {
                (
                    e.airport.code.clone(),
                    e.route.source.clone(),
                    e.route.destination.clone(),
                )
            })
            .collect()
    }

    #[test]
    fn test_shortest_single_and_ties() {
        let (_, store) = build(&[("A", "B", 360), ("B", "C", 240), ("C", "D", 180)]);
        let shortest = shortest_route(&store).unwrap();
        assert_eq!(shortest.len(), 1);
        assert_eq!((shortest[0].source.as_str(), shortest[0].destination.as_str()), ("C", "D"));

        let (_, store) = build(&[
            ("A", "B", 360),
            ("B", "C", 240),
            ("C", "D", 180),
            ("A", "E", 180),
        ]);
        let shortest = shortest_route(&store).unwrap();
        let keys: Vec<(String, String)> = shortest
            .into_iter()
            .map(|r| (r.source, r.destination))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("A".to_string(), "E".to_string()),
                ("C".to_string(), "D".to_string())
            ]
        );
    }

    #[test]
    fn test_longest_counts_both_endpoints() {
        let (registry, store) = build(&[("A", "B", 360), ("B", "C", 240), ("C", "D", 180)]);
        let longest = longest_duration_airports(&registry, &store, RouteScope::Both).unwrap();
        assert_eq!(
            pairs(&longest),
            vec![
                ("A".to_string(), "A".to_string(), "B".to_string()),
                ("B".to_string(), "A".to_string(), "B".to_string()),
            ]
        );
    }

    #[test]
    fn test_longest_scope_and_ties() {
        let (registry, store) = build(&[("A", "B", 360), ("C", "D", 360), ("B", "C", 100)]);

        let outgoing = longest_duration_airports(&registry, &store, RouteScope::Outgoing).unwrap();
        let codes: Vec<String> = outgoing.iter().map(|e| e.airport.code.clone()).collect();
        assert_eq!(codes, vec!["A", "C"]);

        let incoming = longest_duration_airports(&registry, &store, RouteScope::Incoming).unwrap();
        let codes: Vec<String> = incoming.iter().map(|e| e.airport.code.clone()).collect();
        assert_eq!(codes, vec!["B", "D"]);

        let both = longest_duration_airports(&registry, &store, RouteScope::Both).unwrap();
        assert_eq!(both.len(), 4);
    }

    #[test]
    fn test_empty_graph() {
        let (registry, store) = build(&[]);
        assert_eq!(shortest_route(&store).unwrap_err().kind(), ErrorKind::EmptyGraph);
        assert_eq!(
            longest_duration_airports(&registry, &store, RouteScope::Both)
                .unwrap_err()
                .kind(),
            ErrorKind::EmptyGraph
        );
    }
}
