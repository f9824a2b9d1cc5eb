#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::RouteScope;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

pub use toml_config::TomlConfig;

pub const DEFAULT_CODE_LENGTH: usize = 3;
pub const DEFAULT_MAX_NAME_LENGTH: usize = 100;

/// Engine-side settings, independent of where they were read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    pub code_length: usize,
    pub max_name_length: usize,
    pub unique_positions: bool,
    pub longest_scope: RouteScope,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
            unique_positions: false,
            longest_scope: RouteScope::Both,
        }
    }
}

impl Validate for EngineOptions {
    fn validate(&self) -> Result<()> {
        validation::validate_range("registry.code_length", self.code_length, 1, 8)?;
        validation::validate_range("registry.max_name_length", self.max_name_length, 1, 1024)?;
        Ok(())
    }
}
