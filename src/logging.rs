//! Subscriber setup for the `tracing` events the parser emits.
//!
//! Nothing is installed implicitly. Embedding applications that already own a
//! global subscriber keep it; these helpers then do nothing.

use std::sync::Once;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset: this crate at info, everything else at warn.
pub const DEFAULT_FILTER: &str = "warn,richheader=info";

static INIT: Once = Once::new();

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn install(json: bool) {
    INIT.call_once(|| {
        let registry = tracing_subscriber::registry().with(env_filter());
        let installed = if json {
            registry
                .with(fmt::layer().json().with_target(true).with_current_span(true))
                .try_init()
        } else {
            registry
                .with(fmt::layer().with_target(true).with_line_number(true))
                .try_init()
        };
        if installed.is_ok() {
            info!(json, "richheader logging initialized");
        }
    });
}

/// Human-readable log lines.
pub fn init_tracing() {
    install(false);
}

/// One JSON object per event; used by the Python `init_logging(json=True)`.
pub fn init_tracing_json() {
    install(true);
}
