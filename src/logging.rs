use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILTER: &str = "dexprofile=info,tower_http=info";

/// Installs the global subscriber. `RUST_LOG` wins over [DEFAULT_LOG_FILTER]. Safe to
/// call more than once; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
