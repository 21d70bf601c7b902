use std::sync::Once;

use log::LevelFilter;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "nabu_engine=debug,nabu_engine::gl=trace"). When unset, `RUST_LOG` is
/// consulted, then `default_level`.
///
/// `write_style` controls ANSI coloring behavior.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored.
/// Intended usage is early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&resolve_filter(&config, std::env::var("RUST_LOG").ok()));
        builder.write_style(config.write_style);

        // Tests and tools may have installed a logger already.
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized");
    });
}

/// Picks the filter string: explicit config, then `RUST_LOG`, then the
/// default level.
fn resolve_filter(config: &LoggingConfig, rust_log: Option<String>) -> String {
    config
        .env_filter
        .clone()
        .or(rust_log.filter(|f| !f.trim().is_empty()))
        .unwrap_or_else(|| config.default_level.to_string().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins_over_environment() {
        let config = LoggingConfig {
            env_filter: Some("nabu_engine=debug".into()),
            ..LoggingConfig::default()
        };

        assert_eq!(resolve_filter(&config, Some("warn".into())), "nabu_engine=debug");
    }

    #[test]
    fn environment_wins_over_default_level() {
        let config = LoggingConfig::default();

        assert_eq!(resolve_filter(&config, Some("trace".into())), "trace");
        assert_eq!(resolve_filter(&config, Some("  ".into())), "info");
    }

    #[test]
    fn default_level_is_used_last() {
        let config = LoggingConfig {
            default_level: LevelFilter::Warn,
            ..LoggingConfig::default()
        };

        assert_eq!(resolve_filter(&config, None), "warn");
    }

    #[test]
    fn init_is_idempotent() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig {
            env_filter: Some("off".into()),
            ..LoggingConfig::default()
        });
    }
}
