use std::sync::Once;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "local_guide=info,local_guide_lib=info,tower_http=info";

static INIT: Once = Once::new();

/// Installs the global `tracing` subscriber. `RUST_LOG` overrides the default
/// filter. Safe to call more than once; only the first call has an effect.
pub fn init() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        if let Err(e) = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
        {
            eprintln!("[logging] subscriber already installed: {}", e);
        }
    });
}
