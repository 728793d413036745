//! Server Configuration
//!
//! Layered from an optional TOML file and `CREDIT_RISK__SECTION__KEY`
//! environment variables. Every key has a default, so an empty
//! environment still yields a usable configuration.

use inference_engine::{ArtifactPaths, ClassConvention};
use input_validator::ValidationConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Environment variable naming an alternative configuration file
pub const CONFIG_PATH_ENV: &str = "CREDIT_RISK_CONFIG";

const ENV_PREFIX: &str = "CREDIT_RISK";

/// Complete server configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub artifacts: ArtifactPaths,
    pub classes: ClassConvention,
    pub validation: ValidationConfig,
    pub reports: ReportsConfig,
    pub logging: LoggingConfig,
}

/// Listener settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Offline evaluation outputs served read-only
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportsConfig {
    pub leaderboard: PathBuf,
    pub charts_dir: PathBuf,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            leaderboard: PathBuf::from("reports/leaderboard_final.csv"),
            charts_dir: PathBuf::from("assets"),
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Maximum level: trace, debug, info, warn or error
    pub level: String,
    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load from `$CREDIT_RISK_CONFIG` (or the default path) plus environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path))
    }

    /// Load from a specific file plus environment; the file may be absent
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("artifacts.onnx_classes"),
            )
            .build()?
            .try_deserialize()
    }

    /// Resolve relative file locations against a base directory
    pub fn relative_to(mut self, base: &Path) -> Self {
        self.artifacts = self.artifacts.relative_to(base);
        for path in [&mut self.reports.leaderboard, &mut self.reports.charts_dir] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inference_engine::ModelFormat;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.artifacts.format, ModelFormat::Forest);
        assert_eq!(config.classes, ClassConvention::default());
        assert_eq!(config.reports.charts_dir, PathBuf::from("assets"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/credit-risk.toml")).unwrap();
        assert_eq!(config.artifacts.model, PathBuf::from("artifacts/credit_risk_model.json"));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
bind_addr = "127.0.0.1:9000"

[artifacts]
model = "models/forest.onnx"
format = "onnx"
onnx_classes = [1, 2]

[classes]
good_class = 1
bad_class = 2

[logging]
json = true
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.artifacts.format, ModelFormat::Onnx);
        assert_eq!(config.artifacts.onnx_classes, vec![1, 2]);
        assert_eq!(config.artifacts.scaler, PathBuf::from("artifacts/scaler.json"));
        assert_eq!(config.classes.bad_class, 2);
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_relative_to() {
        let config = AppConfig::default().relative_to(Path::new("/srv/credit"));
        assert_eq!(config.artifacts.columns, PathBuf::from("/srv/credit/artifacts/model_columns.json"));
        assert_eq!(config.reports.charts_dir, PathBuf::from("/srv/credit/assets"));
    }
}
