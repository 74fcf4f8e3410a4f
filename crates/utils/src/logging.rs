use tracing_subscriber::{EnvFilter, prelude::*};

const DEFAULT_FILTER: &str = "info,server=debug,services=debug,db=info,tower_http=info";

/// Installs the global tracing subscriber. `RUST_LOG` overrides the default
/// filter.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}
