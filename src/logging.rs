//! Tracing subscriber setup for the binary.

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{AppError, AppResult};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// The more verbose of the configured level and the one implied by `-v` flags.
///
/// A configured value that is not a plain level (e.g. `info,mongodb=warn`)
/// is kept unless a flag was given.
pub fn effective_level(configured: &str, verbose: u8) -> String {
    let requested = match verbose {
        0 => return configured.to_string(),
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    match configured.trim().parse::<Level>() {
        // Levels order by verbosity: TRACE is the greatest.
        Ok(level) if level >= requested => configured.to_string(),
        _ => requested.as_str().to_lowercase(),
    }
}

/// Build the filter: `RUST_LOG` wins, then the configured level.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber. Logs go to stderr so `show` output stays clean.
pub fn init(config: &LoggingConfig, verbose: u8) -> AppResult<()> {
    let filter = build_filter(&effective_level(&config.level, verbose));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
    result.map_err(|e| AppError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_level() {
        assert_eq!(effective_level("warn", 0), "warn");
        assert_eq!(effective_level("warn", 1), "debug");
        assert_eq!(effective_level("warn", 4), "trace");
    }

    #[test]
    fn test_verbose_flag_never_lowers_level() {
        assert_eq!(effective_level("trace", 1), "trace");
        assert_eq!(effective_level("TRACE", 2), "TRACE");
        assert_eq!(effective_level("debug", 1), "debug");
        assert_eq!(effective_level("info,mongodb=warn", 0), "info,mongodb=warn");
        assert_eq!(effective_level("info,mongodb=warn", 1), "debug");
    }
}
