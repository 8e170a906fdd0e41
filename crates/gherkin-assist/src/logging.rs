//! Structured logging setup.
//!
//! The core only emits `tracing` events; hosts that have no subscriber of
//! their own can install one here. Output goes to stderr so it never mixes
//! with anything a host writes to stdout.

use tracing_subscriber::EnvFilter;

use crate::config::AssistConfig;

fn filter_from_config(config: &AssistConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Install a stderr subscriber filtered at the configured level.
///
/// If a global subscriber is already set the call is ignored, so it is safe
/// to call from several entry points and from tests.
pub fn init_logging(config: &AssistConfig) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    // The first subscriber wins.
    let _ = tracing::subscriber::set_global_default(subscriber);
}
