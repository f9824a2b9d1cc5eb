// Adapters layer: concrete implementations for external systems (snapshot storage, csv import).

pub mod csv_import;
pub mod storage;

pub use storage::{JsonFileStore, MemoryStore};
