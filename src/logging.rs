//! Logger initialisation.
//!
//! Everything in the crate logs through the `log` facade; this module installs
//! the `env_logger` backend once.

use std::sync::Once;

/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "glint=debug,winit=warn").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl From<&crate::config::Config> for LoggingConfig {
    fn from(config: &crate::config::Config) -> Self {
        Self {
            env_filter: config.log_filter.clone(),
            ..Default::default()
        }
    }
}

static INIT: Once = Once::new();

/// Install the global logger. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.write_style(config.write_style);
        // Another logger (e.g. a test harness) may already be installed.
        if builder.try_init().is_err() {
            log::debug!("logger already installed");
            return;
        }

        log::debug!("logging initialized");
    });
}
