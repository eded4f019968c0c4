use contracts::shared::dimension::OperationType;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub data: DataConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub operations: OperationsConfig,
    /// File the configuration was read from; `None` for the embedded default
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// JSON file with the index patterns served by the workspace
    pub index_patterns: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: String,
    /// Used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct OperationsConfig {
    /// Display names keyed by operation type, e.g. `sum = "Summe"`
    #[serde(default)]
    pub display_names: HashMap<String, String>,
}

impl OperationsConfig {
    /// Display name table with validated operation keys
    pub fn display_names(&self) -> anyhow::Result<HashMap<OperationType, String>> {
        self.display_names
            .iter()
            .map(|(key, name)| {
                let operation = key
                    .parse::<OperationType>()
                    .map_err(|e| anyhow::anyhow!("[operations.display_names]: {}", e))?;
                Ok((operation, name.clone()))
            })
            .collect()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            filter: default_log_filter(),
        }
    }
}

fn default_log_dir() -> String {
    "target/logs".to_string()
}

fn default_log_filter() -> String {
    "info,tower_http=warn".to_string()
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "127.0.0.1"
port = 3000

[data]
index_patterns = "data/index_patterns.json"

[logging]
dir = "target/logs"
filter = "info,tower_http=warn"

[operations.display_names]
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable
/// 2. Current working directory
/// 3. Falls back to embedded default config
///
/// Runs before tracing is set up; the chosen file is reported in `Config::source`.
pub fn load_config() -> anyhow::Result<Config> {
    let mut candidates = Vec::new();
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.push(exe_dir.join("config.toml"));
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join("config.toml"));
    }

    for config_path in candidates {
        if config_path.exists() {
            let mut config = parse_config(&std::fs::read_to_string(&config_path)?)?;
            config.source = Some(config_path);
            return Ok(config);
        }
    }

    parse_config(DEFAULT_CONFIG)
}

fn parse_config(contents: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str(contents)?)
}

/// Resolve a configured path.
/// Relative paths are tried next to the executable first, then the working directory.
pub fn resolve_path(path_str: &str) -> PathBuf {
    let path = Path::new(path_str);

    if path.is_absolute() {
        return path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let resolved = exe_dir.join(path);
            if resolved.exists() {
                return resolved;
            }
        }
    }

    PathBuf::from(path_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.data.index_patterns, "data/index_patterns.json");
        assert_eq!(config.logging.dir, "target/logs");
        assert!(config.operations.display_names().unwrap().is_empty());
        assert_eq!(config.source, None);
    }

    #[test]
    fn test_display_names_table() {
        let config = parse_config(
            r#"
            [server]
            host = "127.0.0.1"
            port = 3000

            [data]
            index_patterns = "data/index_patterns.json"

            [operations.display_names]
            sum = "Summe"
            avg = "Durchschnitt"
            "#,
        )
        .unwrap();

        let names = config.operations.display_names().unwrap();
        assert_eq!(names.get(&OperationType::Sum).map(String::as_str), Some("Summe"));
        assert_eq!(
            names.get(&OperationType::Average).map(String::as_str),
            Some("Durchschnitt")
        );
    }

    #[test]
    fn test_unknown_operation_in_display_names() {
        let config = parse_config(
            r#"
            [server]
            host = "127.0.0.1"
            port = 3000

            [data]
            index_patterns = "data/index_patterns.json"

            [operations.display_names]
            average = "Mean"
            "#,
        )
        .unwrap();

        assert!(config.operations.display_names().is_err());
    }

    #[test]
    fn test_logging_section_is_optional() {
        let config = parse_config(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [data]
            index_patterns = "/srv/patterns.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.filter, "info,tower_http=warn");
        assert_eq!(
            resolve_path(&config.data.index_patterns),
            PathBuf::from("/srv/patterns.json")
        );
    }
}
