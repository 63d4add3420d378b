use std::io::IsTerminal;

use sdl_check_config::log::{LogFormat, LoggingConfig};
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::time::UtcTime, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
    Registry,
};

type DynLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// `filter` directives win over `level`; invalid directives are skipped.
pub fn create_env_filter(config: &LoggingConfig) -> EnvFilter {
    let default_level: LevelFilter = (&config.level).into();

    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .parse_lossy(config.filter.as_deref().unwrap_or_default())
}

/// Installs the global subscriber. Logs go to stderr; stdout carries results.
///
/// The returned guard flushes the non-blocking writer on drop and must be kept
/// alive for as long as logging is needed.
pub fn configure_logging(config: &LoggingConfig) -> WorkerGuard {
    let stderr_stream = std::io::stderr();
    let is_terminal = stderr_stream.is_terminal();
    let (stderr_writer, stderr_guard) = tracing_appender::non_blocking(stderr_stream);
    let filter = create_env_filter(config);
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(stderr_writer);
    let timer = UtcTime::rfc_3339();

    let layer: DynLayer<Registry> = match config.format {
        LogFormat::Json => stderr_layer
            .json()
            .with_timer(timer)
            .with_thread_ids(false)
            .with_target(false)
            .with_ansi(false)
            .flatten_event(true)
            .with_filter(filter)
            .boxed(),
        LogFormat::Text => stderr_layer
            .compact()
            .with_thread_ids(false)
            .with_timer(timer)
            .with_target(false)
            .with_ansi(is_terminal)
            .with_filter(filter)
            .boxed(),
    };

    tracing_subscriber::registry().with(layer).init();

    stderr_guard
}
