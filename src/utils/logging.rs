use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "tailor_gallery=debug";

/// Installs the global tracing subscriber for a host application.
///
/// `RUST_LOG` wins over `default_filter`. Fails instead of panicking when a
/// subscriber is already installed.
pub fn init_tracing(default_filter: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
