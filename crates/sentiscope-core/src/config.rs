//! Configuration loading and discovery.
//!
//! Discovery order:
//! 1. Explicit files (e.g. from `--config`)
//! 2. Project config, walking up from the current directory
//! 3. User config from the XDG config directory
//! 4. Defaults
//!
//! Environment variables prefixed `SENTISCOPE_` override everything.
//!
//! # Supported formats
//!
//! TOML (`.toml`), YAML (`.yaml`, `.yml`), and JSON (`.json`).
//! Config file names searched in each directory: `sentiscope.<ext>` and
//! `.sentiscope.<ext>`. When multiple files exist in the same directory,
//! all are merged via figment with later extensions overriding earlier.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use sentiscope_core::config::ConfigLoader;
//!
//! let cwd = std::env::current_dir().unwrap();
//! let cwd = Utf8PathBuf::try_from(cwd).expect("current directory is not valid UTF-8");
//! let config = ConfigLoader::new().with_project_search(&cwd).load().unwrap();
//! println!("bind address: {}", config.bind_addr);
//! ```

use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Settings for the external language-model analyzer.
///
/// When present (and the API key environment variable is set), the HTTP
/// service sends analysis requests to the hosted model instead of the
/// rule-based engine.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ModelConfig {
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Base URL of the chat-completion API.
    pub base_url: String,
    /// Model name to request.
    pub model: String,
    /// Maximum attempts when the API reports rate limiting.
    pub max_retries: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_retries: 3,
        }
    }
}

/// The configuration for sentiscope.
///
/// Deserialized from config files found during discovery (TOML, YAML, or
/// JSON), with `SENTISCOPE_` environment overrides.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for JSONL log files (stderr only if unset).
    pub log_dir: Option<Utf8PathBuf>,
    /// Address the HTTP service binds to.
    pub bind_addr: String,
    /// Path to the SQLite history database. Omit to disable persistence.
    pub database_path: Option<Utf8PathBuf>,
    /// How many history records a caller can fetch (newest first).
    pub history_limit: u32,
    /// Bearer token → user id map for the HTTP service.
    ///
    /// Stands in for a hosted auth service; the storage contract only
    /// needs an opaque user identifier per token.
    pub auth_tokens: Option<HashMap<String, String>>,
    /// External language-model settings. Omit to always use the
    /// rule-based engine.
    pub model: Option<ModelConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            log_dir: None,
            bind_addr: "127.0.0.1:8080".to_string(),
            database_path: None,
            history_limit: 10,
            auth_tokens: None,
            model: None,
        }
    }
}

impl Config {
    /// Validate cross-field constraints that serde cannot express.
    fn validate(self) -> ConfigResult<Self> {
        if let Some(tokens) = &self.auth_tokens {
            for (token, user) in tokens {
                if user.trim().is_empty() {
                    return Err(ConfigError::EmptyUserId {
                        token: token.clone(),
                    });
                }
            }
        }
        Ok(self)
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Supported configuration file extensions (in order of preference).
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Application name for XDG directory lookup and config file names.
const APP_NAME: &str = "sentiscope";

/// Builder for loading configuration from multiple sources.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Starting directory for project config search.
    project_search_root: Option<Utf8PathBuf>,
    /// Whether to include user config from the XDG directory.
    include_user_config: bool,
    /// Stop searching when we hit a directory containing this file/dir.
    boundary_marker: Option<String>,
    /// Explicit config files to load (for `--config` or tests).
    explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader with default settings.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Set the starting directory for project config search.
    ///
    /// The loader walks up from this directory looking for config files.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set whether to include user config from `~/.config/sentiscope/`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Add an explicit config file to load.
    ///
    /// Files are loaded in order, with later files taking precedence.
    /// Explicit files are loaded after discovered files.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration, merging all discovered sources.
    ///
    /// Precedence (highest to lowest): environment variables, explicit
    /// files, project config (closest to search root), user config,
    /// defaults.
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<Config> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if self.include_user_config
            && let Some(user_file) = user_config_file()
        {
            tracing::debug!(file = %user_file, "merging user config");
            figment = merge_file(figment, &user_file);
        }

        if let Some(root) = &self.project_search_root {
            // Walk up collecting candidates, then merge root→leaf so the
            // file closest to the search root wins.
            let mut found = discover_project_files(root, self.boundary_marker.as_deref());
            found.reverse();
            for file in found {
                tracing::debug!(file = %file, "merging project config");
                figment = merge_file(figment, &file);
            }
        }

        for file in &self.explicit_files {
            tracing::debug!(file = %file, "merging explicit config");
            figment = merge_file(figment, file);
        }

        figment = figment.merge(Env::prefixed("SENTISCOPE_"));

        let config: Config = figment.extract().map_err(Box::new)?;
        config.validate()
    }
}

/// Merge a single config file into the figment based on its extension.
fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
    match path.extension() {
        Some("toml") => figment.merge(Toml::file(path.as_std_path())),
        Some("yaml" | "yml") => figment.merge(Yaml::file(path.as_std_path())),
        Some("json") => figment.merge(Json::file(path.as_std_path())),
        _ => figment,
    }
}

/// Find project config files by walking up from `start`.
///
/// Returns files ordered closest-first. Traversal stops after a directory
/// containing the boundary marker (usually `.git`).
fn discover_project_files(start: &Utf8Path, boundary: Option<&str>) -> Vec<Utf8PathBuf> {
    let mut found = Vec::new();
    let mut dir = Some(start);

    while let Some(current) = dir {
        for name in [APP_NAME.to_string(), format!(".{APP_NAME}")] {
            for ext in CONFIG_EXTENSIONS {
                let candidate = current.join(format!("{name}.{ext}"));
                if candidate.is_file() {
                    found.push(candidate);
                }
            }
        }

        if let Some(marker) = boundary
            && current.join(marker).exists()
        {
            break;
        }
        dir = current.parent();
    }

    found
}

/// Locate the user config file under the XDG config directory, if any.
fn user_config_file() -> Option<Utf8PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    let config_dir = Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok()?;
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| config_dir.join(format!("config.{ext}")))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_utf8_dir() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        (dir, path)
    }

    #[test]
    fn defaults_when_nothing_found() {
        let (_guard, dir) = temp_utf8_dir();
        // Boundary marker keeps the walk inside the temp dir.
        std::fs::create_dir(dir.join(".git").as_std_path()).unwrap();

        let config = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(&dir)
            .load()
            .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.database_path.is_none());
        assert!(config.model.is_none());
    }

    #[test]
    fn project_toml_is_discovered() {
        let (_guard, dir) = temp_utf8_dir();
        std::fs::create_dir(dir.join(".git").as_std_path()).unwrap();
        std::fs::write(
            dir.join("sentiscope.toml").as_std_path(),
            "bind_addr = \"0.0.0.0:9000\"\nhistory_limit = 5\n",
        )
        .unwrap();

        let config = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(&dir)
            .load()
            .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.history_limit, 5);
    }

    #[test]
    fn explicit_file_overrides_project() {
        let (_guard, dir) = temp_utf8_dir();
        std::fs::create_dir(dir.join(".git").as_std_path()).unwrap();
        std::fs::write(
            dir.join("sentiscope.toml").as_std_path(),
            "log_level = \"warn\"\n",
        )
        .unwrap();
        let explicit = dir.join("override.toml");
        std::fs::write(explicit.as_std_path(), "log_level = \"debug\"\n").unwrap();

        let config = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(&dir)
            .with_file(&explicit)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn closer_project_file_wins() {
        let (_guard, dir) = temp_utf8_dir();
        std::fs::create_dir(dir.join(".git").as_std_path()).unwrap();
        let nested = dir.join("service");
        std::fs::create_dir(nested.as_std_path()).unwrap();
        std::fs::write(
            dir.join("sentiscope.toml").as_std_path(),
            "history_limit = 20\n",
        )
        .unwrap();
        std::fs::write(
            nested.join("sentiscope.toml").as_std_path(),
            "history_limit = 3\n",
        )
        .unwrap();

        let config = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(&nested)
            .load()
            .unwrap();

        assert_eq!(config.history_limit, 3);
    }

    #[test]
    fn auth_tokens_and_model_section_parse() {
        let (_guard, dir) = temp_utf8_dir();
        std::fs::create_dir(dir.join(".git").as_std_path()).unwrap();
        std::fs::write(
            dir.join("sentiscope.toml").as_std_path(),
            r#"
database_path = "history.db"

[auth_tokens]
secret-token = "user-1"

[model]
model = "gpt-4o"
max_retries = 5
"#,
        )
        .unwrap();

        let config = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(&dir)
            .load()
            .unwrap();

        let tokens = config.auth_tokens.unwrap();
        assert_eq!(tokens.get("secret-token").map(String::as_str), Some("user-1"));
        let model = config.model.unwrap();
        assert_eq!(model.model, "gpt-4o");
        assert_eq!(model.max_retries, 5);
        assert_eq!(model.api_key_env, "OPENAI_API_KEY");
        assert_eq!(
            config.database_path.as_deref().map(Utf8Path::as_str),
            Some("history.db")
        );
    }

    #[test]
    fn empty_user_id_is_rejected() {
        let (_guard, dir) = temp_utf8_dir();
        std::fs::create_dir(dir.join(".git").as_std_path()).unwrap();
        std::fs::write(
            dir.join("sentiscope.toml").as_std_path(),
            "[auth_tokens]\nbad-token = \"  \"\n",
        )
        .unwrap();

        let result = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(&dir)
            .load();

        assert!(matches!(result, Err(ConfigError::EmptyUserId { .. })));
    }
}
