use crate::config::Config;
use log::{LevelFilter, SetLoggerError};
use simplelog::{CombinedLogger, ConfigBuilder, SharedLogger, TermLogger};

/// Log targets of the HTTP stack underneath the server and the LINE client.
/// Matched by prefix, so `hyper` also covers `hyper_util`.
const DEPENDENCY_TARGETS: &[&str] = &["hyper", "h2", "reqwest", "rustls", "tower_http", "mio"];

pub struct Logger {}

impl Logger {
    /// Installs a terminal logger for this service and a second one for its
    /// HTTP dependencies.
    ///
    /// Service crates log at the configured level. Dependencies only log
    /// warnings and errors unless the configured level is Trace.
    pub fn init_logger(config: &Config) -> Result<(), SetLoggerError> {
        CombinedLogger::init(Self::loggers(config.log_level_filter))
    }

    fn loggers(level: LevelFilter) -> Vec<Box<dyn SharedLogger>> {
        vec![
            Self::term_logger(level, Self::service_config()),
            Self::term_logger(Self::dependency_level(level), Self::dependency_config()),
        ]
    }

    fn term_logger(level: LevelFilter, config: simplelog::Config) -> Box<dyn SharedLogger> {
        TermLogger::new(
            level,
            config,
            simplelog::TerminalMode::Mixed,
            simplelog::ColorChoice::Auto,
        )
    }

    fn dependency_level(level: LevelFilter) -> LevelFilter {
        match level {
            LevelFilter::Trace => LevelFilter::Trace,
            other => other.min(LevelFilter::Warn),
        }
    }

    fn service_config() -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder.set_time_format_rfc3339();
        for target in DEPENDENCY_TARGETS {
            builder.add_filter_ignore_str(target);
        }
        builder.build()
    }

    fn dependency_config() -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder.set_time_format_rfc3339();
        for target in DEPENDENCY_TARGETS {
            builder.add_filter_allow_str(target);
        }
        builder.build()
    }
}
