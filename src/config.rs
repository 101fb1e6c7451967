//! Application Configuration
//!
//! TOML configuration with environment-variable overrides. The file is
//! optional: a missing file yields the defaults, which are enough to run
//! against an in-memory-style local setup once the API keys are supplied
//! via the environment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use taskmind_nlp::ProviderConfig;

/// Default zero-shot classification model
const DEFAULT_CLASSIFIER_MODEL: &str = "facebook/bart-large-mnli";
/// Default extraction model
const DEFAULT_EXTRACTOR_MODEL: &str = "gpt-4o-mini";

/// Database section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite file; defaults next to the config file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Telegram channel section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token; the channel is disabled when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,
}

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default = "default_classifier")]
    pub classifier: ProviderConfig,
    #[serde(default = "default_extractor")]
    pub extractor: ProviderConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
}

fn default_classifier() -> ProviderConfig {
    ProviderConfig {
        model: DEFAULT_CLASSIFIER_MODEL.to_string(),
        ..ProviderConfig::default()
    }
}

fn default_extractor() -> ProviderConfig {
    ProviderConfig {
        model: DEFAULT_EXTRACTOR_MODEL.to_string(),
        ..ProviderConfig::default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            classifier: default_classifier(),
            extractor: default_extractor(),
            telegram: TelegramConfig::default(),
        }
    }
}

impl AppConfig {
    /// Default config file location under the platform config dir
    pub fn default_path() -> AppResult<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| AppError::config("could not resolve a config directory"))?;
        Ok(base.join("taskmind").join("taskmind.toml"))
    }

    /// Load from the given file, falling back to defaults when it does not
    /// exist, then apply environment overrides.
    pub fn load(path: &Path) -> AppResult<Self> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            toml::from_str(&raw).map_err(|e| AppError::config(format!("{}: {}", path.display(), e)))?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    /// Resolved database path: configured value, or `tasks.db` in the
    /// platform data dir.
    pub fn database_path(&self) -> AppResult<PathBuf> {
        if let Some(path) = &self.database.path {
            return Ok(path.clone());
        }
        let base = dirs::data_dir()
            .ok_or_else(|| AppError::config("could not resolve a data directory"))?;
        Ok(base.join("taskmind").join("tasks.db"))
    }

    /// Environment overrides, highest precedence
    fn apply_env(&mut self) {
        if let Ok(path) = std::env::var("TASKMIND_DB_PATH") {
            self.database.path = Some(PathBuf::from(path));
        }
        if let Ok(key) = std::env::var("TASKMIND_CLASSIFIER_API_KEY") {
            self.classifier.api_key = Some(key);
        }
        if let Ok(key) = std::env::var("TASKMIND_EXTRACTOR_API_KEY") {
            self.extractor.api_key = Some(key);
        }
        if let Ok(token) = std::env::var("TASKMIND_TELEGRAM_BOT_TOKEN") {
            self.telegram.bot_token = Some(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.classifier.model, DEFAULT_CLASSIFIER_MODEL);
        assert_eq!(config.extractor.model, DEFAULT_EXTRACTOR_MODEL);
        assert!(config.telegram.bot_token.is_none());
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.classifier.model, DEFAULT_CLASSIFIER_MODEL);
    }

    #[test]
    fn test_load_file_with_partial_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taskmind.toml");
        std::fs::write(
            &path,
            r#"
[database]
path = "/tmp/taskmind-test/tasks.db"

[extractor]
model = "gpt-4o"
temperature = 0.1
"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(
            config.database.path.as_deref(),
            Some(Path::new("/tmp/taskmind-test/tasks.db"))
        );
        assert_eq!(config.extractor.model, "gpt-4o");
        // Untouched sections keep their defaults
        assert_eq!(config.classifier.model, DEFAULT_CLASSIFIER_MODEL);
    }

    #[test]
    fn test_env_override_beats_file_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taskmind.toml");
        std::fs::write(&path, "[classifier]\nmodel = \"bart\"\napi_key = \"from-file\"\n")
            .unwrap();

        std::env::set_var("TASKMIND_CLASSIFIER_API_KEY", "from-env");
        let config = AppConfig::load(&path).unwrap();
        std::env::remove_var("TASKMIND_CLASSIFIER_API_KEY");

        assert_eq!(config.classifier.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.classifier.model, "bart");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "not = [valid").unwrap();
        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
