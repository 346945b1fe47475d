//! Console logging
//!
//! Filtering follows the RUST_LOG environment variable and defaults to `warn`:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=atlas::processor=info` - table mutations only
//!
//! Logs go to stderr so they never mix with prompts.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize tracing subscriber with console logging
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // A subscriber may already be set, e.g. when embedded in tests
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .try_init();
}
