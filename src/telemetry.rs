use tracing::subscriber::set_global_default;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Console logging, filtered by `RUST_LOG` (INFO when unset).
pub fn init_telemetry() -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    // Level filter layer to filter traces based on level (trace, debug, info, warn, error).
    let level_filter_layer = EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new("INFO"));
    // Layer for printing spans to stdout
    let formatting_layer = fmt::layer().with_target(false).with_writer(std::io::stdout);

    let subscriber = Registry::default()
        .with(level_filter_layer)
        .with(formatting_layer);

    set_global_default(subscriber)
}
