use std::sync::Once;

use log::LevelFilter;

/// Logging setup for hosts embedding the engine.
///
/// The engine logs through the `log` facade: transactions and render
/// passes at debug, event publishing and listener churn at trace. This
/// config wires those targets into `env_logger` without the host having
/// to know the module layout. A `RUST_LOG` environment variable takes
/// precedence over everything here.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level for the engine's own targets. Warnings only by default —
    /// layout oddities (e.g. a street asked to run vertically) still
    /// surface, render chatter does not.
    pub engine_level: LevelFilter,
    /// Raise the event subsystem to trace regardless of `engine_level`,
    /// logging every published batch and listener subscribe/release.
    /// Useful when a consumer seems to miss or double-see events.
    pub trace_events: bool,
    /// Additional directives in `env_logger` filter syntax, applied on
    /// top of the engine levels (e.g. "my_viewer=debug").
    pub extra_filters: Option<String>,
    /// ANSI coloring behavior.
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            engine_level: LevelFilter::Warn,
            trace_events: false,
            extra_filters: None,
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

        if let Ok(env_filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&env_filter);
        } else {
            builder.filter_module("arbor_engine", config.engine_level);
            if config.trace_events {
                builder.filter_module("arbor_engine::event", LevelFilter::Trace);
            }
            if let Some(filters) = &config.extra_filters {
                builder.parse_filters(filters);
            }
        }

        builder.write_style(config.write_style);
        builder.init();

        log::debug!("engine logging initialized");
    });
}
