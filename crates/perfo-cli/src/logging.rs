use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Log level used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "warn";

/// Installs a stderr subscriber filtered by `RUST_LOG`.
///
/// Stdout is reserved for the timing report.
pub(crate) fn init() -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}
