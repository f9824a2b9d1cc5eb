use crate::config::{EngineOptions, DEFAULT_CODE_LENGTH, DEFAULT_MAX_NAME_LENGTH};
use crate::domain::model::RouteScope;
use crate::utils::error::{Result, RouteError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_STORE_PATH: &str = "./data/routes.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub store: StoreConfig,
    pub registry: RegistryConfig,
    pub queries: QueryConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_STORE_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub code_length: usize,
    pub max_name_length: usize,
    pub unique_positions: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
            unique_positions: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub longest_scope: RouteScope,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RouteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RouteError::ConfigError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ROUTE_STORE})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static env var pattern"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    /// 取得引擎設定
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            code_length: self.registry.code_length,
            max_name_length: self.registry.max_name_length,
            unique_positions: self.registry.unique_positions,
            longest_scope: self.queries.longest_scope,
        }
    }

    pub fn store_path(&self) -> &str {
        &self.store.path
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    /// 驗證配置的合理性
    fn validate(&self) -> Result<()> {
        validation::validate_path("store.path", &self.store.path)?;
        self.engine_options().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[store]
path = "./test-data/routes.json"

[registry]
code_length = 4
max_name_length = 50
unique_positions = true

[queries]
longest_scope = "outgoing"

[logging]
verbose = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.store_path(), "./test-data/routes.json");
        assert!(config.verbose());
        assert!(!config.json_logs());

        let options = config.engine_options();
        assert_eq!(options.code_length, 4);
        assert_eq!(options.max_name_length, 50);
        assert!(options.unique_positions);
        assert_eq!(options.longest_scope, RouteScope::Outgoing);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.store_path(), DEFAULT_STORE_PATH);
        assert_eq!(config.engine_options(), EngineOptions::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ROUTE_GRAPH_TEST_STORE", "/tmp/route-graph-test.json");

        let toml_content = r#"
[store]
path = "${ROUTE_GRAPH_TEST_STORE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.store_path(), "/tmp/route-graph-test.json");

        std::env::remove_var("ROUTE_GRAPH_TEST_STORE");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[store]
path = ""

[registry]
code_length = 0
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_scope_is_rejected() {
        let err = TomlConfig::from_toml_str("[queries]\nlongest_scope = \"sideways\"\n").unwrap_err();
        assert!(matches!(err, RouteError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[registry]\nunique_positions = true\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert!(config.engine_options().unique_positions);
    }
}
