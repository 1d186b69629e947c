//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter, e.g.
/// `OUTLIER_LOG=outlier_core=debug`.
pub const LOG_ENV: &str = "OUTLIER_LOG";

const DEFAULT_FILTER: &str = "price_outliers=info,outlier_core=info";

static INIT: Once = Once::new();

/// Install the global subscriber, writing to stderr.
///
/// `filter` takes precedence over `OUTLIER_LOG`; an invalid or missing filter
/// falls back to info level for this crate. Later calls are no-ops.
pub fn init_tracing(filter: Option<&str>) {
    INIT.call_once(|| {
        let filter = filter
            .and_then(|f| EnvFilter::try_new(f).ok())
            .or_else(|| EnvFilter::try_from_env(LOG_ENV).ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .init();
    });
}
