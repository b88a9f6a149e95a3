//! Logger setup for the headless runner
//!
//! Log lines go to stderr so the JSON report on stdout stays parseable.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Install env_logger for a run.
///
/// `verbose` comes from the settings file and lowers the default level to
/// debug, which adds row generation and per-run details. `RUST_LOG`, when
/// set, overrides both levels.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    // A second install (tests, embedding hosts) keeps the first logger.
    let _ = Builder::from_env(env)
        .target(Target::Stderr)
        .format_timestamp_millis()
        .try_init();
}
