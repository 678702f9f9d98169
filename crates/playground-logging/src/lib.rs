//! Tracing setup shared by the playground binaries.
//!
//! Installs a registry with an `EnvFilter` read from `RUST_LOG` (falling back
//! to [`DEFAULT_FILTER`]) and a `fmt` layer writing to stderr, so stdout stays
//! free for machine-readable output.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "playground=info";

/// Install the global subscriber with [`DEFAULT_FILTER`].
///
/// Returns false if a subscriber was already installed.
pub fn init() -> bool {
    init_with(DEFAULT_FILTER)
}

/// Install the global subscriber, using `default_filter` when `RUST_LOG` is
/// not set.
pub fn init_with(default_filter: &str) -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok()
}
