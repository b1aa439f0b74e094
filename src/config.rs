// Configuration loading and parsing (config/quotedeck.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },

    #[error("failed to resolve data directory: {message}")]
    DataDirError { message: String },
}

// ---------------------------------------------------------------------------
// quotedeck.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub remote: RemoteConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    /// Whether the periodic sync timer and quote pushes run at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub url: String,
    pub sync_interval_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Database file location. When omitted, the platform data directory
    /// is used (e.g. `~/.local/share/quotedeck/quotedeck.db`).
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub path: String,
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Resolve the durable database location: the configured path when set,
    /// otherwise `quotedeck.db` in the platform data directory (created if
    /// missing).
    pub fn database_path(&self) -> Result<String, ConfigError> {
        if let Some(path) = &self.storage.path {
            return Ok(path.clone());
        }
        let dirs = directories::ProjectDirs::from("", "", "quotedeck").ok_or_else(|| {
            ConfigError::DataDirError {
                message: "no home directory available".to_string(),
            }
        })?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir).map_err(|e| ConfigError::DataDirError {
            message: format!("failed to create {}: {e}", data_dir.display()),
        })?;
        let path = data_dir.join("quotedeck.db");
        path.to_str()
            .map(|s| s.to_string())
            .ok_or_else(|| ConfigError::DataDirError {
                message: format!("data directory path is not valid UTF-8: {}", path.display()),
            })
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/quotedeck.toml` relative to
/// the given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy
/// defaults. Prefer `load_config()` which handles default initialization
/// automatically.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_path = base_dir.join("config").join("quotedeck.toml");
    let config_text = read_file(&config_path)?;
    let config: Config =
        toml::from_str(&config_text).map_err(|e| ConfigError::ParseError {
            path: config_path,
            source: e,
        })?;

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        // If config/ also doesn't exist, the app will fail to load config.
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };

        // Skip .example template files
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                // File already exists in config/, skip it
            }
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working
/// directory. Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let url = &config.remote.url;
    if url.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "remote.url".into(),
            message: "must not be empty".into(),
        });
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            field: "remote.url".into(),
            message: format!("must start with http:// or https://, got `{url}`"),
        });
    }

    if config.remote.sync_interval_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "remote.sync_interval_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.export.path.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "export.path".into(),
            message: "must not be empty".into(),
        });
    }

    if let Some(path) = &config.storage.path {
        if path.is_empty() {
            return Err(ConfigError::ValidationError {
                field: "storage.path".into(),
                message: "must not be empty when set (omit the key instead)".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
