//! Structured logging for the terrain renderer.
//!
//! Provides span-based, filterable logging via the `tracing` ecosystem:
//! console output with module paths and an uptime timer, filterable per
//! target, with the configuration system's log level as the default.

use tellus_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// The filter resolves in order: `RUST_LOG` from the environment, the
/// config's `debug.log_level`, then `"info"`.
///
/// # Examples
///
/// ```no_run
/// use tellus_config::Config;
/// use tellus_log::init_logging;
///
/// // Basic initialization
/// init_logging(None);
///
/// // With config override
/// let config = Config::default();
/// init_logging(Some(&config));
/// ```
pub fn init_logging(config: Option<&Config>) {
    let filter_str = match config {
        Some(config) if !config.debug.log_level.is_empty() => config.debug.log_level.clone(),
        _ => "info".to_string(),
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}

/// Create an `EnvFilter` with the default filter string.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new("info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_level() {
        let filter = default_env_filter();
        assert!(format!("{}", filter).contains("info"));
    }

    #[test]
    fn test_config_level_used_when_present() {
        let mut config = Config::default();
        config.debug.log_level = "trace".to_string();
        // Mirrors the resolution order in init_logging.
        let filter_str = match Some(&config) {
            Some(config) if !config.debug.log_level.is_empty() => config.debug.log_level.clone(),
            _ => "info".to_string(),
        };
        assert_eq!(filter_str, "trace");
    }

    #[test]
    fn test_env_filter_parsing() {
        let valid_filters = [
            "info",
            "debug,tellus_cull=trace",
            "warn,tellus_tile=debug",
            "error",
        ];
        for filter_str in &valid_filters {
            let result = EnvFilter::try_from(*filter_str);
            assert!(result.is_ok(), "Failed to parse filter: {}", filter_str);
        }
    }
}
