//! Logging set-up.

use std::sync::Once;
use tracing::Level;

static INIT: Once = Once::new();

/// Map a `-v` count to a log level. Warnings are always shown.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the stderr subscriber once. Later calls do nothing.
pub fn init(verbosity: u8) {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(level_for(verbosity))
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
