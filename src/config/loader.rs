//! Configuration loader with file resolution and environment override support.

use super::error::{ConfigError, ConfigResult};
use super::schema::{Config, LogFormat};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Environment variable prefix for overrides
const ENV_PREFIX: &str = "RECIPE_SEED";

/// Config file name
const CONFIG_FILE_NAME: &str = "recipe_seed.toml";

/// Environment variable for explicit config path
const CONFIG_PATH_ENV: &str = "RECIPE_SEED_CONFIG";

/// Connection string variable read by the application services.
const LEGACY_URI_ENV: &str = "MONGO_URL";

/// Configuration loader with resolution and override logic.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Resolved config file path (if any)
    pub config_path: Option<PathBuf>,
    /// The loaded configuration
    pub config: Config,
}

impl ConfigLoader {
    /// Load configuration using standard resolution order.
    ///
    /// Resolution priority (highest to lowest):
    /// 1. `RECIPE_SEED_CONFIG` environment variable (explicit path)
    /// 2. `./recipe_seed.toml` (current directory)
    /// 3. Platform config directory, e.g. `~/.config/recipe_seed/recipe_seed.toml`
    /// 4. Built-in defaults (no file required)
    ///
    /// Environment variables can override any config file values.
    pub fn load() -> ConfigResult<Self> {
        let config_path = resolve_config_path();

        let mut config = if let Some(ref path) = config_path {
            load_from_file(path)?
        } else {
            Config::default()
        };

        apply_env_overrides(&mut config)?;
        config.validate()?;

        Ok(Self { config_path, config })
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(ConfigError::Missing(path));
        }
        let mut config = load_from_file(&path)?;
        apply_env_overrides(&mut config)?;
        config.validate()?;

        Ok(Self {
            config_path: Some(path),
            config,
        })
    }

    /// Create a loader with default configuration (no file).
    pub fn with_defaults() -> Self {
        let mut config = Config::default();
        // Still apply env overrides even with defaults
        if apply_env_overrides(&mut config).is_err() {
            config = Config::default();
        }

        Self {
            config_path: None,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }

    /// Save the current configuration to a specific file.
    pub fn save_to(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        save_to_file(&self.config, path.as_ref())
    }
}

/// Resolve the configuration file path using standard locations.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let cwd_config = PathBuf::from(CONFIG_FILE_NAME);
    if cwd_config.exists() {
        return Some(cwd_config);
    }

    get_default_config_path().filter(|p| p.exists())
}

/// Platform config directory for this tool.
pub fn get_default_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "recipe_seed").map(|dirs| dirs.config_dir().to_path_buf())
}

pub fn get_default_config_path() -> Option<PathBuf> {
    get_default_config_dir().map(|d| d.join(CONFIG_FILE_NAME))
}

fn load_from_file(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io("read", path, e))?;
    Ok(toml::from_str(&content)?)
}

fn save_to_file(config: &Config, path: &Path) -> ConfigResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::io("write", path, e))?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|e| ConfigError::io("write", path, e))
}

/// Apply environment variable overrides to the configuration.
///
/// Environment variables follow the pattern: `RECIPE_SEED_<SECTION>_<KEY>`
/// For example:
/// - `RECIPE_SEED_DATABASE_URI=mongodb://mongo:27017`
/// - `RECIPE_SEED_SEED_DATASET=catalog`
///
/// `MONGO_URL` is honoured as a fallback for the connection string.
fn apply_env_overrides(config: &mut Config) -> ConfigResult<()> {
    let var = |key: &str| std::env::var(format!("{}_{}", ENV_PREFIX, key));

    // Database overrides
    if let Ok(val) = var("DATABASE_URI").or_else(|_| std::env::var(LEGACY_URI_ENV)) {
        config.database.uri = val;
    }
    if let Ok(val) = var("DATABASE_NAME") {
        config.database.name = val;
    }
    if let Ok(val) = var("DATABASE_CONNECT_TIMEOUT_MS") {
        config.database.connect_timeout_ms = val.parse().map_err(|_| {
            ConfigError::env(
                format!("{}_DATABASE_CONNECT_TIMEOUT_MS", ENV_PREFIX),
                "Invalid timeout",
            )
        })?;
    }

    // Seed overrides
    if let Ok(val) = var("SEED_DATASET") {
        config.seed.dataset = val.parse().map_err(|e: String| {
            ConfigError::env(format!("{}_SEED_DATASET", ENV_PREFIX), e)
        })?;
    }

    // Logging overrides
    if let Ok(val) = var("LOG_LEVEL") {
        config.logging.level = val;
    }
    if let Ok(val) = var("LOG_FORMAT") {
        config.logging.format = match val.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            "compact" => LogFormat::Compact,
            _ => {
                return Err(ConfigError::env(
                    format!("{}_LOG_FORMAT", ENV_PREFIX),
                    "Expected json, pretty or compact",
                ))
            }
        };
    }

    Ok(())
}
