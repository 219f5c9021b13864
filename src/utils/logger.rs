use crate::config::LogFormat;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_directives(verbose: bool, level: Option<&str>) -> String {
    match (level, verbose) {
        (_, true) => "roster_store=debug,info".to_string(),
        (Some(level), false) => format!("roster_store={},warn", level),
        (None, false) => "roster_store=info,warn".to_string(),
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `verbose` and `level`.
pub fn init_logger(verbose: bool, level: Option<&str>, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose, level)));

    let layer = tracing_subscriber::fmt::layer()
        .with_target(format == LogFormat::Json)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Compact => registry.with(layer.compact()).init(),
        LogFormat::Json => registry.with(layer.json()).init(),
    }
}
