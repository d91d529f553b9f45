use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Directives used by the API server when `RUST_LOG` is unset.
pub const SERVER_DIRECTIVES: &str = "info,tower_http=debug,sqlx=warn";

/// Directives used by command-line tools when `RUST_LOG` is unset.
pub const CLI_DIRECTIVES: &str = "warn";

/// Install the JSON stdout subscriber. `RUST_LOG` wins over `default_directives`.
///
/// Only the first call in a process takes effect.
pub fn init_tracing(default_directives: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_current_span(false))
        .try_init();
}
