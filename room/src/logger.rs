use tracing_subscriber::EnvFilter;

/// `RUST_LOG` picks the filter, `info` when unset.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
