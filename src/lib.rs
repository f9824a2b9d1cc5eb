pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{JsonFileStore, MemoryStore};
pub use config::{EngineOptions, TomlConfig};
pub use crate::core::graph::RouteGraph;
pub use domain::model::{Airport, Direction, LongestDurationEntry, NthNodeResult, Route, RouteScope};
pub use utils::error::{ErrorKind, Result, RouteError};
