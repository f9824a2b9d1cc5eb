pub mod extremum;
pub mod graph;
pub mod registry;
pub mod route_store;
pub mod traversal;

pub use crate::domain::model::{
    Airport, Direction, GraphSnapshot, GraphStats, LongestDurationEntry, NthNodeResult, Route,
    RouteKey, RouteScope,
};
pub use crate::domain::ports::SnapshotStore;
pub use crate::utils::error::Result;
