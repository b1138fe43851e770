//! Errors raised while locating, reading or checking the seed configuration.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested file does not exist.
    #[error("No seed configuration at '{0}'")]
    Missing(PathBuf),

    #[error("Could not {action} seed configuration '{path}': {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Seed configuration is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Seed configuration cannot be written as TOML: {0}")]
    Render(#[from] toml::ser::Error),

    /// A setting would make the run meaningless, e.g. an empty database name.
    #[error("Setting '{key}' {message}")]
    Invalid { key: &'static str, message: String },

    #[error("{var} holds an unusable value: {message}")]
    Env { var: String, message: String },
}

impl ConfigError {
    pub fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            message: message.into(),
        }
    }

    pub fn env(var: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Env {
            var: var.into(),
            message: message.into(),
        }
    }

    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
