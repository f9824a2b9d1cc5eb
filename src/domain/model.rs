use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::RouteError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub position: i64,
}

impl Airport {
    pub fn new(code: impl Into<String>, name: impl Into<String>, position: i64) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            position,
        }
    }
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code, self.name)
    }
}

/// A directed, weighted edge between two distinct airports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub source: String,
    pub destination: String,
    /// Minutes, always positive.
    pub duration: i64,
    pub created_at: DateTime<Utc>,
}

impl Route {
    pub fn key(&self) -> RouteKey {
        RouteKey::new(&self.source, &self.destination)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {} ({} min)",
            self.source, self.destination, self.duration
        )
    }
}

/// Composite key of a route: the ordered (source, destination) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteKey {
    pub source: String,
    pub destination: String,
}

impl RouteKey {
    pub fn new(source: &str, destination: &str) -> Self {
        Self {
            source: source.to_string(),
            destination: destination.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards lower positions.
    Left,
    /// Towards higher positions.
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => f.write_str("left"),
            Direction::Right => f.write_str("right"),
        }
    }
}

impl FromStr for Direction {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(RouteError::invalid_input(
                "direction",
                s,
                "expected 'left' or 'right'",
            )),
        }
    }
}

/// Which routes count towards an airport when looking for its longest route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteScope {
    Outgoing,
    Incoming,
    #[default]
    Both,
}

impl RouteScope {
    pub fn includes_outgoing(self) -> bool {
        matches!(self, RouteScope::Outgoing | RouteScope::Both)
    }

    pub fn includes_incoming(self) -> bool {
        matches!(self, RouteScope::Incoming | RouteScope::Both)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NthNodeResult {
    pub start: Airport,
    pub direction: Direction,
    pub n: i64,
    pub start_index: usize,
    pub target_index: usize,
    pub target: Airport,
}

/// One airport whose longest route ties for the global maximum duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongestDurationEntry {
    pub airport: Airport,
    pub route: Route,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
    pub airport_count: usize,
    pub route_count: usize,
}

/// Serialized form of the whole graph, as written by a snapshot store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub airports: Vec<Airport>,
    #[serde(default)]
    pub routes: Vec<Route>,
}

impl GraphSnapshot {
    pub fn is_empty(&self) -> bool {
        self.airports.is_empty() && self.routes.is_empty()
    }
}
